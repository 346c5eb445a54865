use std::process::ExitCode;

/// Exit status of a relang command.
///
/// - `Success` (0): no issues found, or all fixes applied
/// - `Failure` (1): issues found, or a dry run has pending changes
/// - `Error` (2): internal error (unreadable files, bad config, I/O failure)
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
