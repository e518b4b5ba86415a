//! File system errors

use super::InstallerError;

/// Creates a file removal error
pub fn remove_failed(path: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::FileRemoveFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
