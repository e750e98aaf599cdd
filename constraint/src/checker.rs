//! Constraint checking.

use forge_core::messages::{REASON_NOT_BOOLEAN, REASON_NOT_SATISFIED};
use forge_core::{Map, Value};
use forge_document::{Constraint, DomainSpecification, RuleDocument};
use tracing::{debug, info};

use crate::eval::Evaluator;
use crate::result::{Evaluation, EvaluationResult};

/// Constraint checker.
///
/// Evaluates every constraint of a rule document, in document order. A
/// constraint that cannot be evaluated fails on its own; it never stops
/// the others from being checked.
pub struct ConstraintChecker<'r> {
    rules: &'r RuleDocument,
}

impl<'r> ConstraintChecker<'r> {
    /// Create a new constraint checker.
    pub fn new(rules: &'r RuleDocument) -> Self {
        Self { rules }
    }

    /// Check all constraints against a specification.
    pub fn check(&self, spec: &DomainSpecification) -> Evaluation {
        let evaluator = Evaluator::new(spec.fields());
        let evaluation: Evaluation = self
            .rules
            .constraints()
            .iter()
            .map(|constraint| check_constraint(&evaluator, constraint))
            .collect();

        info!(
            rules = %self.rules.document(),
            specification = %spec.document(),
            constraints = evaluation.len(),
            failed = evaluation.failure_count(),
            "evaluated constraints"
        );
        evaluation
    }

    /// Check a single constraint by id.
    pub fn check_one(&self, id: &str, spec: &DomainSpecification) -> Option<EvaluationResult> {
        let constraint = self.rules.get(id)?;
        Some(check_constraint(&Evaluator::new(spec.fields()), constraint))
    }
}

/// Evaluate every constraint of `rules` against `spec`.
pub fn evaluate(rules: &RuleDocument, spec: &DomainSpecification) -> Evaluation {
    ConstraintChecker::new(rules).check(spec)
}

/// Evaluate a constraint directly against a field map.
pub fn check_fields(constraint: &Constraint, fields: &Map) -> EvaluationResult {
    check_constraint(&Evaluator::new(fields), constraint)
}

fn check_constraint(evaluator: &Evaluator<'_>, constraint: &Constraint) -> EvaluationResult {
    let result = match evaluator.eval(constraint.predicate()) {
        Ok(Value::Bool(true)) => EvaluationResult::pass(constraint.id()),
        Ok(Value::Bool(false)) => EvaluationResult::fail(
            constraint.id(),
            format!("{}: {}", REASON_NOT_SATISFIED, constraint.source()),
        ),
        Ok(other) => EvaluationResult::fail(
            constraint.id(),
            format!("{}: got {}", REASON_NOT_BOOLEAN, other.type_name()),
        ),
        Err(e) => EvaluationResult::fail(constraint.id(), e.to_string()),
    };

    debug!(
        constraint = %result.id(),
        passed = result.passed(),
        message = result.reason(),
        "evaluated constraint"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::fields;
    use forge_document::DocumentFormat;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn rules(yaml: &str) -> RuleDocument {
        RuleDocument::parse(yaml, DocumentFormat::Yaml, "rules.yml").unwrap()
    }

    fn spec(fields: Map) -> DomainSpecification {
        DomainSpecification::from_map("spec", fields)
    }

    const MIN_HARDWARE: &str = r#"
constraints:
  - id: min-hardware
    predicate: "ram_gb >= 8"
"#;

    #[test]
    fn test_min_hardware_fails_with_4gb() {
        // GIVEN the min-hardware rule and a 4 GB specification
        let rules = rules(MIN_HARDWARE);
        let spec = spec(fields! { "ram_gb" => 4 });

        // WHEN the constraints are checked
        let evaluation = evaluate(&rules, &spec);

        // THEN exactly one failing result is produced
        assert_eq!(
            evaluation.as_slice(),
            &[EvaluationResult::fail(
                "min-hardware",
                "predicate not satisfied: ram_gb >= 8"
            )]
        );
    }

    #[test]
    fn test_min_hardware_passes_with_16gb() {
        let rules = rules(MIN_HARDWARE);
        let spec = spec(fields! { "ram_gb" => 16 });

        let evaluation = evaluate(&rules, &spec);

        assert_eq!(
            evaluation.as_slice(),
            &[EvaluationResult::pass("min-hardware")]
        );
        assert!(evaluation.all_passed());
    }

    #[test]
    fn test_absent_field_fails_only_that_constraint() {
        // GIVEN three constraints, the middle one over an absent field
        let rules = rules(
            r#"
constraints:
  - id: a
    predicate: "ram_gb >= 8"
  - id: b
    predicate: "gpu.vram_gb >= 4"
  - id: c
    require: pattern
"#,
        );
        let spec = spec(fields! { "ram_gb" => 16, "pattern" => "skyrim" });

        // WHEN
        let evaluation = evaluate(&rules, &spec);

        // THEN the others are still evaluated, in document order
        let ids: Vec<&str> = evaluation.iter().map(EvaluationResult::id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(evaluation.as_slice()[0].passed());
        assert_eq!(
            evaluation.as_slice()[1],
            EvaluationResult::fail("b", "field absent: gpu.vram_gb")
        );
        assert!(evaluation.as_slice()[2].passed());
    }

    #[test]
    fn test_require_reports_not_satisfied() {
        let rules = rules("constraints: [{id: has-context, require: context}]");
        let evaluation = evaluate(&rules, &spec(Map::new()));
        assert_eq!(
            evaluation.as_slice()[0].reason(),
            "predicate not satisfied: exists(context)"
        );
    }

    #[test]
    fn test_non_boolean_predicate_fails() {
        let rules = rules("constraints: [{id: n, predicate: 'ram_gb + 1'}]");
        let evaluation = evaluate(&rules, &spec(fields! { "ram_gb" => 1 }));
        assert_eq!(
            evaluation.as_slice()[0].reason(),
            "predicate did not evaluate to a boolean: got Int"
        );
    }

    #[test]
    fn test_null_comparison_fails_as_non_boolean() {
        let rules = rules("constraints: [{id: n, predicate: 'owner > 1'}]");
        let evaluation = evaluate(&rules, &spec(fields! { "owner" => Value::Null }));
        assert!(evaluation.as_slice()[0].reason().ends_with("got Null"));
    }

    #[test]
    fn test_empty_rule_document_passes() {
        let rules = rules("constraints: []");
        let evaluation = evaluate(&rules, &spec(fields! { "ram_gb" => 4 }));
        assert!(evaluation.is_empty());
        assert!(evaluation.all_passed());
    }

    #[test]
    fn test_check_one() {
        let rules = rules(MIN_HARDWARE);
        let checker = ConstraintChecker::new(&rules);
        let spec = spec(fields! { "ram_gb" => 8 });
        assert_eq!(
            checker.check_one("min-hardware", &spec),
            Some(EvaluationResult::pass("min-hardware"))
        );
        assert_eq!(checker.check_one("missing", &spec), None);
    }

    #[test]
    fn test_long_or_chain() {
        // GIVEN a flat `or` chain within the nesting limit
        let chain = |terms: usize| vec!["ram_gb == 1"; terms].join(" or ");
        let predicate = format!("{} or ram_gb == 16", chain(60));
        let rules = rules(&format!("constraints: [{{id: wide, predicate: '{}'}}]", predicate));

        // WHEN / THEN it evaluates like any other predicate
        let evaluation = evaluate(&rules, &spec(fields! { "ram_gb" => 16 }));
        assert_eq!(evaluation.as_slice(), &[EvaluationResult::pass("wide")]);

        // AND a 10k-term chain is refused when the document loads
        let yaml = format!("constraints: [{{id: huge, predicate: '{}'}}]", chain(10_000));
        let err = RuleDocument::parse(&yaml, DocumentFormat::Yaml, "rules.yml").unwrap_err();
        assert!(err.is_schema_error());
        assert!(err.to_string().contains("huge"));
        assert!(err.to_string().contains("nested more than"));
    }

    fn rule_set(thresholds: &[i64]) -> RuleDocument {
        let constraints = thresholds
            .iter()
            .enumerate()
            .map(|(i, t)| Constraint::new(format!("c{}", i), "", format!("ram_gb >= {}", t)).unwrap())
            .collect();
        RuleDocument::from_constraints("generated", constraints).unwrap()
    }

    proptest! {
        #[test]
        fn prop_one_result_per_constraint_in_order(
            thresholds in prop::collection::vec(-100i64..100, 0..20),
            ram in -100i64..100,
        ) {
            let rules = rule_set(&thresholds);
            let spec = spec(fields! { "ram_gb" => ram });

            let evaluation = evaluate(&rules, &spec);

            prop_assert_eq!(evaluation.len(), thresholds.len());
            for (i, (result, t)) in evaluation.iter().zip(&thresholds).enumerate() {
                let expected_id = format!("c{}", i);
                prop_assert_eq!(result.id(), expected_id.as_str());
                prop_assert_eq!(result.passed(), ram >= *t);
            }
        }

        #[test]
        fn prop_evaluation_is_deterministic(
            thresholds in prop::collection::vec(-100i64..100, 0..20),
            ram in prop::option::of(-100i64..100),
        ) {
            let rules = rule_set(&thresholds);
            let fields = match ram {
                Some(ram) => fields! { "ram_gb" => ram },
                None => Map::new(),
            };
            let spec = spec(fields);

            prop_assert_eq!(evaluate(&rules, &spec), evaluate(&rules, &spec));
        }
    }
}
