//! Error context macros for consistent error messages

/// Macro for adding context to file writes
///
/// # Example
/// ```rust,ignore
/// std::fs::write(path, contents)
///     .map_err(|e| file_error_context!("Failed to write config", path.display(), e))?;
/// ```
#[macro_export]
macro_rules! file_error_context {
    ($operation:expr, $path:expr, $err:expr) => {
        $crate::error::InstallerError::FileWriteFailed {
            path: $path.to_string(),
            reason: format!("{}: {}", $operation, $err),
        }
    };
}
