//! Installer settings (`--config <file>.yaml`)
//!
//! Every field defaults to the value used on a real machine, so the file is
//! optional and may set only the keys it cares about.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Filesystem label of the root partition
pub const ROOT_LABEL: &str = "nixos";

/// Filesystem label of the EFI system partition
pub const BOOT_LABEL: &str = "boot";

/// Installer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Where the target root filesystem is mounted
    pub mount_point: PathBuf,

    /// Kernel block-device registry
    pub sys_block_dir: PathBuf,

    /// Present (as a directory) only on EFI-booted machines
    pub efi_firmware_dir: PathBuf,

    /// Device node directory
    pub dev_dir: PathBuf,

    /// udev filesystem-label symlinks
    pub label_dir: PathBuf,

    /// Seconds of countdown between confirmation and partitioning
    pub countdown_secs: u64,

    /// Readiness polling cadence
    pub poll: PollSettings,
}

/// Bounded polling cadence for device nodes and label symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    pub attempts: u32,
    pub interval_ms: u64,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            mount_point: PathBuf::from("/mnt"),
            sys_block_dir: PathBuf::from("/sys/block"),
            efi_firmware_dir: PathBuf::from("/sys/firmware/efi"),
            dev_dir: PathBuf::from("/dev"),
            label_dir: PathBuf::from("/dev/disk/by-label"),
            countdown_secs: 10,
            poll: PollSettings::default(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            attempts: 10,
            interval_ms: 1000,
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl InstallerConfig {
    /// Load settings from a YAML file, or the defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let yaml = std::fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&yaml)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Directory holding the target's NixOS configuration
    pub fn target_config_dir(&self) -> PathBuf {
        self.mount_point.join("etc").join("nixos")
    }

    /// Password-hash file for a user inside the target
    pub fn password_file(&self, username: &str) -> PathBuf {
        self.mount_point
            .join("etc")
            .join(format!("passwordFile-{username}"))
    }

    /// Label symlink for a filesystem label
    pub fn label_path(&self, label: &str) -> PathBuf {
        self.label_dir.join(label)
    }

    /// Device node for a kernel device name
    pub fn device_path(&self, name: &str) -> PathBuf {
        self.dev_dir.join(name)
    }
}
