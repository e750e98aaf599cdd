//! `forge eval`

use std::path::PathBuf;

use clap::Args;
use forge_constraint::Evaluator;
use forge_document::DomainSpecification;
use forge_parser::parse_predicate;

use super::Outcome;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Predicate to evaluate, e.g. "ram_gb >= 8"
    pub predicate: String,

    /// Domain specification (JSON or YAML)
    #[arg(short, long, env = "FORGE_SPEC")]
    pub spec: PathBuf,
}

/// Print the value of one predicate. Any value, including `false`, is a
/// successful run.
pub fn execute(args: EvalArgs, format: OutputFormat) -> CliResult<Outcome> {
    let spec = DomainSpecification::load(&args.spec)?;
    let expr = parse_predicate(&args.predicate)?;
    let value = Evaluator::new(spec.fields()).eval(&expr)?;

    match format {
        OutputFormat::Table => println!("{}", value),
        _ => output::print(format, &value)?,
    }
    Ok(Outcome::Accepted)
}
