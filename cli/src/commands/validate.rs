//! `forge validate`

use std::path::PathBuf;

use clap::Args;
use forge_document::RuleDocument;
use serde::Serialize;

use super::Outcome;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Rules document (JSON or YAML)
    #[arg(short, long, env = "FORGE_RULES")]
    pub rules: PathBuf,
}

#[derive(Serialize)]
struct ConstraintSummary<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    predicate: &'a str,
    fields: Vec<String>,
}

#[derive(Serialize)]
struct RulesSummary<'a> {
    document: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    constraints: Vec<ConstraintSummary<'a>>,
}

/// Load the rules document and list its constraints with the fields each
/// predicate reads.
pub fn execute(args: ValidateArgs, format: OutputFormat) -> CliResult<Outcome> {
    let rules = RuleDocument::load(&args.rules)?;
    let summary = RulesSummary {
        document: rules.document(),
        version: rules.version(),
        constraints: rules
            .constraints()
            .iter()
            .map(|c| ConstraintSummary {
                id: c.id(),
                description: c.description(),
                predicate: c.source(),
                fields: c.fields().iter().map(|f| f.to_string()).collect(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Table => {
            if let Some(version) = summary.version {
                println!("{} (version {})\n", summary.document, version);
            }
            let rows: Vec<Vec<String>> = summary
                .constraints
                .iter()
                .map(|c| vec![c.id.to_string(), c.fields.join(", "), c.predicate.to_string()])
                .collect();
            println!("{}", output::table(&["ID", "FIELDS", "PREDICATE"], &rows));
            println!("\n({} constraints)", summary.constraints.len());
        }
        _ => output::print(format, &summary)?,
    }

    Ok(Outcome::Accepted)
}
