//! Installer configuration
//!
//! Holds the settings file (`--config`) and the paths derived from it.

pub mod settings;

pub use settings::{BOOT_LABEL, InstallerConfig, PollSettings, ROOT_LABEL};
