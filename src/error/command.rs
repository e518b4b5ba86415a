//! External command errors

use super::InstallerError;

/// Creates an error for a program that could not be started
pub fn spawn_failed(command: impl Into<String>, err: &std::io::Error) -> InstallerError {
    InstallerError::CommandSpawnFailed {
        command: command.into(),
        reason: err.to_string(),
    }
}

/// Creates an error for a program that exited unsuccessfully
pub fn exit_failed(command: impl Into<String>, status: impl Into<String>) -> InstallerError {
    InstallerError::CommandFailed {
        command: command.into(),
        status: status.into(),
    }
}
