//! Settings file errors

use super::InstallerError;

/// Creates a settings read error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a settings parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
