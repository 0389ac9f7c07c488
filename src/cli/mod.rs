//! Command-line interface layer.

use anyhow::Result;
use tracing::debug;

pub mod args;
mod commands;
pub mod exit_status;
mod logging;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logging::init(args.verbose());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    debug!(
        command = ?result.kind,
        errors = result.error_count,
        warnings = result.warning_count,
        "command finished"
    );
    Ok(result.exit_status())
}
