//! `forge generate`

use std::path::PathBuf;

use clap::Args;
use forge_constraint::evaluate;
use forge_core::messages::VALIDATED_MARKER;
use forge_generator::{Artifact, GenerateError, Generator, GeneratorConfig, ViolationReport};

use super::{Inputs, Outcome};
use crate::error::CliResult;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Write the artifact here (YAML for .yml/.yaml, JSON otherwise)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write the violation report here when generation is rejected
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Key of the validated marker
    #[arg(long, default_value = VALIDATED_MARKER)]
    pub marker: String,

    /// Do not attach a forge plan
    #[arg(long)]
    pub no_plan: bool,
}

pub fn execute(args: GenerateArgs, format: OutputFormat) -> CliResult<Outcome> {
    let (rules, spec) = args.inputs.load()?;
    let generator = Generator::new(
        GeneratorConfig::new()
            .with_marker_key(args.marker)
            .with_plan_forge(!args.no_plan),
    );

    let evaluation = evaluate(&rules, &spec);
    match generator.generate(&spec, evaluation.as_slice()) {
        Ok(artifact) => {
            emit_artifact(&artifact, args.out, format)?;
            Ok(Outcome::Accepted)
        }
        Err(GenerateError::ConstraintViolation(report)) => {
            emit_report(&report, args.report, format)?;
            Ok(Outcome::Rejected)
        }
    }
}

fn emit_artifact(artifact: &Artifact, out: Option<PathBuf>, format: OutputFormat) -> CliResult<()> {
    let Some(path) = out else {
        return output::print(format, artifact);
    };

    output::write_document(&path, artifact)?;
    if format == OutputFormat::Table {
        println!(
            "Generated {} from '{}'",
            path.display(),
            artifact.specification()
        );
        if let Some(plan) = artifact.plan() {
            println!(
                "  forge: {} on {} ({} files)",
                plan.architecture,
                plan.hardware,
                plan.files.len()
            );
            for warning in &plan.warnings {
                println!("  warning: {}", warning);
            }
        }
    } else {
        output::print(format, artifact)?;
    }
    Ok(())
}

fn emit_report(
    report: &ViolationReport,
    path: Option<PathBuf>,
    format: OutputFormat,
) -> CliResult<()> {
    if let Some(path) = path {
        output::write_document(&path, report)?;
    }
    match format {
        OutputFormat::Table => println!("Rejected: {}", report),
        _ => output::print(format, report)?,
    }
    Ok(())
}
