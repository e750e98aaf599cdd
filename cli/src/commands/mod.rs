//! Subcommands of the `forge` binary.

use std::path::PathBuf;

use clap::Args;
use forge_document::{DomainSpecification, RuleDocument};

use crate::error::CliResult;

pub mod check;
pub mod eval;
pub mod generate;
pub mod validate;

/// How a successful command run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    /// The specification failed at least one constraint.
    Rejected,
}

/// The two documents of a forge run.
#[derive(Args, Debug)]
pub struct Inputs {
    /// Rules document (JSON or YAML)
    #[arg(short, long, env = "FORGE_RULES")]
    pub rules: PathBuf,

    /// Domain specification (JSON or YAML)
    #[arg(short, long, env = "FORGE_SPEC")]
    pub spec: PathBuf,
}

impl Inputs {
    pub fn load(&self) -> CliResult<(RuleDocument, DomainSpecification)> {
        let rules = RuleDocument::load(&self.rules)?;
        let spec = DomainSpecification::load(&self.spec)?;
        Ok((rules, spec))
    }
}
