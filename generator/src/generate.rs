//! Artifact generation.

use forge_constraint::{evaluate, EvaluationResult};
use forge_core::messages::REASON_NOT_SATISFIED;
use forge_core::Value;
use forge_document::{DomainSpecification, RuleDocument};
use tracing::{info, warn};

use crate::artifact::Artifact;
use crate::config::GeneratorConfig;
use crate::error::{Failure, GenerateError, GenerateResult, ViolationReport};
use crate::plan::{ForgePlan, FORGE_KEY};

/// Turns a specification and its evaluation results into an artifact.
///
/// Generation is all or nothing: any failing result rejects the whole
/// specification and the error lists every failure.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate an artifact from already computed results.
    pub fn generate(
        &self,
        spec: &DomainSpecification,
        results: &[EvaluationResult],
    ) -> GenerateResult<Artifact> {
        let failures: Vec<Failure> = results
            .iter()
            .filter(|r| !r.passed())
            .map(|r| Failure {
                id: r.id().to_string(),
                reason: r.message().unwrap_or(REASON_NOT_SATISFIED).to_string(),
            })
            .collect();

        if !failures.is_empty() {
            let report = ViolationReport {
                specification: spec.document().to_string(),
                failures,
            };
            warn!(
                specification = %report.specification,
                failed = report.failures.len(),
                "generation rejected"
            );
            return Err(GenerateError::ConstraintViolation(report));
        }

        let mut fields = spec.fields().clone();
        let plan = if self.config.plan_forge {
            ForgePlan::from_fields(&fields)
        } else {
            None
        };
        if let Some(plan) = &plan {
            fields.insert(FORGE_KEY.to_string(), plan.to_value());
        }
        fields.insert(self.config.marker_key.clone(), Value::Bool(true));

        info!(
            specification = %spec.document(),
            constraints = results.len(),
            architecture = plan.as_ref().map(|p| p.architecture.as_str()).unwrap_or("-"),
            "generated artifact"
        );

        Ok(Artifact::new(
            spec.document().to_string(),
            self.config.marker_key.clone(),
            fields,
            plan,
        ))
    }

    /// Evaluate `rules` against `spec`, then generate.
    pub fn run(&self, rules: &RuleDocument, spec: &DomainSpecification) -> GenerateResult<Artifact> {
        let evaluation = evaluate(rules, spec);
        self.generate(spec, evaluation.as_slice())
    }
}

/// Generate with the default configuration.
pub fn generate(spec: &DomainSpecification, results: &[EvaluationResult]) -> GenerateResult<Artifact> {
    Generator::default().generate(spec, results)
}
