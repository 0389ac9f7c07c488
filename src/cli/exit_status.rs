use std::process::ExitCode;

/// Exit status of a todoctl invocation.
///
/// - `Success` (0): Scan completed; annotations alone never fail a scan
/// - `Failure` (1): Unreadable files, or warnings under `--deny-warnings`
/// - `Error` (2): The command could not run (invalid config, unwritable output)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
