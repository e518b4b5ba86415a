//! Error types and handling for the installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`command`]: External command errors
//! - [`config`]: Settings file errors
//! - [`fs`]: File system errors
//! - [`stage`]: Orchestrator stage attribution

pub mod command;
pub mod config;
pub mod fs;
mod macros;
pub mod stage;

pub use stage::{Stage, StageResultExt};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    // Precondition errors
    #[error("snowy-lab-installer must be run as root!")]
    #[diagnostic(
        code(snowy::precondition::not_root),
        help("Re-run the installer with sudo or from a root shell")
    )]
    NotRoot,

    #[error("Something is already mount at {path}!")]
    #[diagnostic(
        code(snowy::precondition::mount_point_busy),
        help("Unmount whatever is mounted there before installing")
    )]
    MountPointBusy { path: String },

    // Disk errors
    #[error("Failed to read block device registry {path}: {reason}")]
    #[diagnostic(code(snowy::disk::enumeration_failed))]
    DiskEnumerationFailed { path: String, reason: String },

    #[error("No installable disks found under {path}")]
    #[diagnostic(
        code(snowy::disk::none_found),
        help("Attach a disk or check that the storage driver is loaded")
    )]
    NoDisksFound { path: String },

    #[error("Unknown disk: {name}")]
    #[diagnostic(
        code(snowy::disk::unknown),
        help("Run 'snowy-lab-installer disks' to see the detected disks")
    )]
    UnknownDisk { name: String },

    // Command errors
    #[error("Failed to start `{command}`: {reason}")]
    #[diagnostic(code(snowy::command::spawn_failed))]
    CommandSpawnFailed { command: String, reason: String },

    #[error("`{command}` failed: {status}")]
    #[diagnostic(code(snowy::command::failed))]
    CommandFailed { command: String, status: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(snowy::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(snowy::config::parse_failed),
        help("The settings file is YAML; every key is optional")
    )]
    ConfigParseFailed { path: String, reason: String },

    // Template errors
    #[error("Failed to render template '{name}': {reason}")]
    #[diagnostic(code(snowy::template::render_failed))]
    TemplateRenderFailed { name: String, reason: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(snowy::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to remove file: {path}: {reason}")]
    #[diagnostic(code(snowy::fs::remove_failed))]
    FileRemoveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(snowy::fs::io_error))]
    IoError { message: String },

    // Prompt errors
    #[error("Failed to read input: {message}")]
    #[diagnostic(code(snowy::prompt::read_failed))]
    PromptFailed { message: String },

    #[error("Installation aborted by operator")]
    #[diagnostic(code(snowy::prompt::aborted))]
    Aborted,

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(snowy::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    // Stage attribution
    #[error("{stage}: {source}")]
    #[diagnostic(code(snowy::stage::failed))]
    Stage {
        stage: Stage,
        #[source]
        source: Box<InstallerError>,
    },
}

impl InstallerError {
    /// Stage the error was raised in, if it was attributed to one
    pub fn stage(&self) -> Option<Stage> {
        match self {
            InstallerError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstallerError {
    fn from(err: std::io::Error) -> Self {
        InstallerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for InstallerError {
    fn from(err: serde_json::Error) -> Self {
        InstallerError::IoError {
            message: format!("Failed to serialize JSON: {err}"),
        }
    }
}

impl From<minijinja::Error> for InstallerError {
    fn from(err: minijinja::Error) -> Self {
        InstallerError::TemplateRenderFailed {
            name: err.name().unwrap_or("unknown").to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for InstallerError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => InstallerError::Aborted,
            other => InstallerError::PromptFailed {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;
