//! Block device discovery and partition planning
//!
//! A "disk" here is an entry of the kernel block-device registry that has a
//! `device` descriptor directory, which leaves out partitions and virtual
//! devices such as loop or ram disks.

pub mod partition;

pub use partition::PartitionPlan;

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::{InstallerError, Result};

/// Bytes per sector as reported by `/sys/block/<disk>/size`
const SECTOR_SIZE: f64 = 512.0;

/// Identity of an addressable block device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disk {
    /// Kernel device name, like "sda" or "nvme0n1"
    pub name: String,

    /// Size in 512-byte sectors, `None` when unreadable
    pub raw_size: Option<u64>,

    /// `None` when the descriptor could not be read
    pub vendor: Option<String>,

    /// `None` when the descriptor could not be read
    pub model: Option<String>,
}

impl Disk {
    /// Read a disk's descriptors from its registry entry.
    ///
    /// Returns `None` for entries without a `device` directory.
    pub fn read(sys_block_dir: &Path, name: &str) -> Option<Self> {
        let entry = sys_block_dir.join(name);
        let device = entry.join("device");
        if !fs::metadata(&device).is_ok_and(|m| m.is_dir()) {
            tracing::debug!(name, "skipping block entry without device directory");
            return None;
        }

        let raw_size = read_first_line(&entry.join("size")).and_then(|s| match s.parse() {
            Ok(sectors) => Some(sectors),
            Err(e) => {
                tracing::debug!(name, value = %s, error = %e, "unparseable sector count");
                None
            }
        });

        Some(Self {
            name: name.to_string(),
            raw_size,
            vendor: read_first_line(&device.join("vendor")),
            model: read_first_line(&device.join("model")),
        })
    }

    /// Device node path under `dev_dir`
    pub fn device_path(&self, dev_dir: &Path) -> String {
        dev_dir.join(&self.name).display().to_string()
    }

    /// One-line human-readable description
    pub fn summary_line(&self) -> String {
        format!(
            "Disk: name= {:<12} vendor= {:<12} model= {:<32} size= {:<10}",
            self.name,
            self.vendor.as_deref().unwrap_or("unknown"),
            self.model.as_deref().unwrap_or("unknown"),
            format_size(self.raw_size)
        )
    }
}

/// List the addressable disks in whatever order the registry yields them.
///
/// Unreadable descriptors degrade to `None`; an unreadable registry fails
/// the whole enumeration.
pub fn enumerate_disks(sys_block_dir: &Path) -> Result<Vec<Disk>> {
    let entries = fs::read_dir(sys_block_dir).map_err(|e| InstallerError::DiskEnumerationFailed {
        path: sys_block_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut disks = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| InstallerError::DiskEnumerationFailed {
            path: sys_block_dir.display().to_string(),
            reason: e.to_string(),
        })?;
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(disk) = Disk::read(sys_block_dir, &name) {
            disks.push(disk);
        }
    }

    Ok(disks)
}

/// Format a sector count as gibibytes, e.g. `1.000 GB total`
#[allow(clippy::cast_precision_loss)]
pub fn format_size(raw_size: Option<u64>) -> String {
    match raw_size {
        Some(sectors) => {
            let gib = sectors as f64 * SECTOR_SIZE / 1024.0 / 1024.0 / 1024.0;
            format!("{gib:.3} GB total")
        }
        None => "unknown size".to_string(),
    }
}

fn read_first_line(path: &Path) -> Option<String> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "descriptor not readable");
            return None;
        }
    };

    let mut line = String::new();
    match BufReader::new(file).read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "descriptor not readable");
            None
        }
    }
}
