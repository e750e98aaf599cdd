//! `forge check`

use clap::Args;
use forge_constraint::ConstraintChecker;

use super::{Inputs, Outcome};
use crate::error::CliResult;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub inputs: Inputs,
}

/// Print one row per constraint. Rejected unless every constraint passed.
pub fn execute(args: CheckArgs, format: OutputFormat) -> CliResult<Outcome> {
    let (rules, spec) = args.inputs.load()?;
    let evaluation = ConstraintChecker::new(&rules).check(&spec);

    match format {
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = evaluation
                .iter()
                .map(|result| {
                    vec![
                        result.id().to_string(),
                        if result.passed() { "PASS" } else { "FAIL" }.to_string(),
                        result.reason().to_string(),
                    ]
                })
                .collect();
            println!("{}", output::table(&["ID", "RESULT", "MESSAGE"], &rows));
            println!(
                "\n({} passed, {} failed)",
                evaluation.len() - evaluation.failure_count(),
                evaluation.failure_count()
            );
        }
        _ => output::print(format, &evaluation)?,
    }

    Ok(if evaluation.all_passed() {
        Outcome::Accepted
    } else {
        Outcome::Rejected
    })
}
