use super::super::exit_status::ExitStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Scan,
    Init,
    Languages,
}

/// Result of running a todoctl command.
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, warnings alone make the command fail (`--deny-warnings`).
    pub deny_warnings: bool,
}

impl CommandResult {
    pub fn success(kind: CommandKind) -> Self {
        Self {
            kind,
            error_count: 0,
            warning_count: 0,
            deny_warnings: false,
        }
    }

    pub fn failure(kind: CommandKind) -> Self {
        Self {
            error_count: 1,
            ..Self::success(kind)
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.error_count > 0 || (self.deny_warnings && self.warning_count > 0) {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(
            CommandResult::success(CommandKind::Scan).exit_status(),
            ExitStatus::Success
        );
        assert_eq!(
            CommandResult::failure(CommandKind::Init).exit_status(),
            ExitStatus::Failure
        );

        let warnings = CommandResult {
            warning_count: 2,
            ..CommandResult::success(CommandKind::Scan)
        };
        assert_eq!(warnings.exit_status(), ExitStatus::Success);

        let denied = CommandResult {
            deny_warnings: true,
            ..warnings
        };
        assert_eq!(denied.exit_status(), ExitStatus::Failure);
    }
}
