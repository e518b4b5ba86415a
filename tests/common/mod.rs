//! Common test utilities for installer integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fake machine tree plus a settings file pointing at it
pub struct TestMachine {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Root of the fake tree
    pub path: PathBuf,
}

impl TestMachine {
    /// Create an empty machine: no disks, legacy firmware
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        for dir in ["sys/block", "sys/firmware", "dev/disk/by-label", "mnt"] {
            std::fs::create_dir_all(path.join(dir)).expect("Failed to create fake tree");
        }

        let machine = Self { temp, path };
        machine.write_config();
        machine
    }

    fn write_config(&self) {
        let root = self.path.display();
        let yaml = format!(
            "mount_point: {root}/mnt\n\
             sys_block_dir: {root}/sys/block\n\
             efi_firmware_dir: {root}/sys/firmware/efi\n\
             dev_dir: {root}/dev\n\
             label_dir: {root}/dev/disk/by-label\n\
             countdown_secs: 0\n\
             poll:\n  attempts: 1\n  interval_ms: 1\n"
        );
        std::fs::write(self.config_path(), yaml).expect("Failed to write settings");
    }

    /// Settings file to pass with `--config`
    pub fn config_path(&self) -> PathBuf {
        self.path.join("installer.yaml")
    }

    /// Add a disk with all descriptors present
    pub fn add_disk(&self, name: &str, vendor: &str, model: &str, sectors: u64) {
        let device = self.path.join("sys/block").join(name).join("device");
        std::fs::create_dir_all(&device).expect("Failed to create disk entry");
        write(&device.join("vendor"), &format!("{vendor}\n"));
        write(&device.join("model"), &format!("{model}\n"));
        write(
            &self.path.join("sys/block").join(name).join("size"),
            &format!("{sectors}\n"),
        );
    }

    /// Add a registry entry that is not a disk
    #[allow(dead_code)]
    pub fn add_virtual(&self, name: &str) {
        let entry = self.path.join("sys/block").join(name);
        std::fs::create_dir_all(&entry).expect("Failed to create virtual entry");
        write(&entry.join("size"), "0\n");
    }

    #[allow(dead_code)]
    pub fn enable_efi(&self) {
        std::fs::create_dir_all(self.path.join("sys/firmware/efi"))
            .expect("Failed to create efi dir");
    }
}

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).expect("Failed to write file");
}
