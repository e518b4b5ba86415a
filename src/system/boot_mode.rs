//! Firmware boot-mode detection

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// How the machine was booted, which decides the partitioning scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BootMode {
    Efi,
    Legacy,
}

impl BootMode {
    /// Inspect the firmware interface directory.
    ///
    /// EFI only when the path exists and is a directory. Any failure to
    /// inspect it counts as legacy, never as an error.
    pub fn detect(efi_firmware_dir: &Path) -> Self {
        match std::fs::metadata(efi_firmware_dir) {
            Ok(meta) if meta.is_dir() => BootMode::Efi,
            Ok(_) => {
                tracing::debug!(
                    path = %efi_firmware_dir.display(),
                    "firmware path is not a directory, assuming legacy boot"
                );
                BootMode::Legacy
            }
            Err(e) => {
                tracing::debug!(
                    path = %efi_firmware_dir.display(),
                    error = %e,
                    "firmware path not readable, assuming legacy boot"
                );
                BootMode::Legacy
            }
        }
    }

    pub fn is_efi(self) -> bool {
        self == BootMode::Efi
    }
}

impl fmt::Display for BootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootMode::Efi => f.write_str("EFI/UEFI"),
            BootMode::Legacy => f.write_str("legacy BIOS"),
        }
    }
}
