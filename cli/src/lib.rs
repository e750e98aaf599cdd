//! Meta-Forge CLI - command-line interface for rule documents
//!
//! - `check`: evaluate every constraint against a domain specification
//! - `generate`: produce the validated artifact, or the violation report
//! - `validate`: load a rules document and list its constraints
//! - `eval`: evaluate one predicate against a domain specification
//!
//! Exit codes: 0 on success, 1 for load, I/O and usage errors, 2 when a
//! specification is rejected.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{check, eval, generate, validate, Outcome};
pub use error::{CliError, CliResult};
pub use output::OutputFormat;

/// Exit code for load, I/O and usage errors.
pub const EXIT_ERROR: u8 = 1;
/// Exit code when at least one constraint failed.
pub const EXIT_REJECTED: u8 = 2;

/// Meta-Forge CLI application
#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "Meta-Forge - check domain specifications against rule documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (table, json, yaml)
    #[arg(short, long, global = true, default_value = "table")]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Evaluate every constraint against a domain specification
    Check(check::CheckArgs),

    /// Generate the validated artifact for a domain specification
    Generate(generate::GenerateArgs),

    /// Load a rules document and list its constraints
    Validate(validate::ValidateArgs),

    /// Evaluate a single predicate against a domain specification
    Eval(eval::EvalArgs),
}

/// Run using the current process arguments.
pub fn run() -> ExitCode {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() { EXIT_ERROR } else { 0 };
            if let Err(io) = e.print() {
                eprintln!("Error: {}", io);
            }
            return ExitCode::from(code);
        }
    };

    init_tracing(cli.verbose);

    match execute(cli.command, cli.output) {
        Ok(Outcome::Accepted) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(EXIT_REJECTED),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn execute(command: Commands, format: OutputFormat) -> CliResult<Outcome> {
    match command {
        Commands::Check(args) => check::execute(args, format),
        Commands::Generate(args) => generate::execute(args, format),
        Commands::Validate(args) => validate::execute(args, format),
        Commands::Eval(args) => eval::execute(args, format),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "forge", "check", "--rules", "r.yml", "--spec", "s.json", "-o", "yaml", "-v",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Yaml);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check(_)));
    }
}
