//! Meta-Forge CLI - entry point of the `forge` binary.

use std::process::ExitCode;

fn main() -> ExitCode {
    forge_cli::run()
}
