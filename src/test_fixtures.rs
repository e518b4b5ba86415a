//! Test fixtures and doubles shared by unit tests.
//!
//! - [`FakeSysfs`]: a temp directory laid out like `/sys/block`, `/dev` and
//!   `/mnt`, plus an [`InstallerConfig`] pointing at it
//! - [`RecordingRunner`]: a [`CommandRunner`] that records instead of spawning
//! - [`ScriptedPrompter`]: a [`Prompter`] with canned answers

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{InstallerConfig, PollSettings};
use crate::disk::Disk;
use crate::error::{self, InstallerError, Result};
use crate::exec::{Cmd, CommandRunner};
use crate::prompt::Prompter;

/// Fake machine tree rooted in a temp directory
pub struct FakeSysfs {
    pub temp: TempDir,
}

impl FakeSysfs {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        for dir in ["sys/block", "sys/firmware", "dev/disk/by-label", "mnt"] {
            std::fs::create_dir_all(temp.path().join(dir)).expect("Failed to create fake tree");
        }
        Self { temp }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn sys_block(&self) -> PathBuf {
        self.root().join("sys/block")
    }

    /// Add a disk; `None` leaves the descriptor file out
    pub fn add_disk(
        &self,
        name: &str,
        vendor: Option<&str>,
        model: Option<&str>,
        size: Option<&str>,
    ) {
        let entry = self.sys_block().join(name);
        std::fs::create_dir_all(entry.join("device")).expect("Failed to create disk entry");
        if let Some(vendor) = vendor {
            self.write(&format!("{name}/device/vendor"), vendor);
        }
        if let Some(model) = model {
            self.write(&format!("{name}/device/model"), model);
        }
        if let Some(size) = size {
            self.write(&format!("{name}/size"), size);
        }
    }

    /// Add a registry entry without a `device` directory
    pub fn add_virtual(&self, name: &str) {
        let entry = self.sys_block().join(name);
        std::fs::create_dir_all(&entry).expect("Failed to create virtual entry");
        std::fs::write(entry.join("size"), "0").expect("Failed to write size");
    }

    /// Write a file relative to the fake `/sys/block`
    pub fn write(&self, relative: &str, content: &str) {
        std::fs::write(self.sys_block().join(relative), content).expect("Failed to write file");
    }

    pub fn enable_efi(&self) {
        std::fs::create_dir_all(self.root().join("sys/firmware/efi"))
            .expect("Failed to create efi dir");
    }

    /// Create a device node under the fake `/dev`
    pub fn add_device_node(&self, name: &str) {
        std::fs::write(self.root().join("dev").join(name), "").expect("Failed to create node");
    }

    /// Create a label symlink target under the fake `/dev/disk/by-label`
    pub fn add_label(&self, label: &str) {
        std::fs::write(self.root().join("dev/disk/by-label").join(label), "")
            .expect("Failed to create label");
    }

    /// What `nixos-generate-config` would leave behind
    pub fn prepare_target_config_dir(&self) {
        std::fs::create_dir_all(self.root().join("mnt/etc/nixos"))
            .expect("Failed to create target config dir");
    }

    /// Settings pointing at this tree, with instant polling and no countdown
    pub fn config(&self) -> InstallerConfig {
        InstallerConfig {
            mount_point: self.root().join("mnt"),
            sys_block_dir: self.sys_block(),
            efi_firmware_dir: self.root().join("sys/firmware/efi"),
            dev_dir: self.root().join("dev"),
            label_dir: self.root().join("dev/disk/by-label"),
            countdown_secs: 0,
            poll: PollSettings {
                attempts: 3,
                interval_ms: 1,
            },
        }
    }
}

/// Records commands instead of running them
#[derive(Default)]
pub struct RecordingRunner {
    log: Vec<Cmd>,
    failures: HashMap<String, u32>,
    probe_succeeds: bool,
    output: Vec<u8>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `times` runs of `program` exit non-zero
    pub fn fail_times(&mut self, program: &str, times: u32) {
        self.failures.insert(program.to_string(), times);
    }

    /// Make every run of `program` exit non-zero
    pub fn fail_always(&mut self, program: &str) {
        self.fail_times(program, u32::MAX);
    }

    pub fn set_probe_succeeds(&mut self, succeeds: bool) {
        self.probe_succeeds = succeeds;
    }

    /// Bytes written to the redirected stdout of `run_with_output`
    pub fn set_output(&mut self, output: &[u8]) {
        self.output = output.to_vec();
    }

    /// Rendered command lines, secrets omitted
    pub fn commands(&self) -> Vec<String> {
        self.log.iter().map(ToString::to_string).collect()
    }

    pub fn invocations(&self) -> &[Cmd] {
        &self.log
    }

    fn outcome(&mut self, cmd: &Cmd) -> Result<()> {
        self.log.push(cmd.clone());
        match self.failures.get_mut(cmd.program()) {
            Some(remaining) if *remaining > 0 => {
                if *remaining != u32::MAX {
                    *remaining -= 1;
                }
                Err(error::command::exit_failed(cmd.to_string(), "exit status: 1"))
            }
            _ => Ok(()),
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<()> {
        self.outcome(cmd)
    }

    fn probe(&mut self, cmd: &Cmd) -> bool {
        self.log.push(cmd.clone());
        self.probe_succeeds
    }

    fn run_with_output(&mut self, cmd: &Cmd, mut output: File) -> Result<()> {
        self.outcome(cmd)?;
        output.write_all(&self.output)?;
        Ok(())
    }
}

/// Canned prompt answers
pub struct ScriptedPrompter {
    pub disk_index: usize,
    pub hostname: String,
    pub username: String,
    pub password: String,
    pub confirm: bool,
    pub asked: Vec<&'static str>,
}

impl Default for ScriptedPrompter {
    fn default() -> Self {
        Self {
            disk_index: 0,
            hostname: "frost".to_string(),
            username: "alice".to_string(),
            password: "hunter2".to_string(),
            confirm: true,
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select_disk(&mut self, _disks: &[Disk]) -> Result<usize> {
        self.asked.push("disk");
        Ok(self.disk_index)
    }

    fn hostname(&mut self) -> Result<String> {
        self.asked.push("hostname");
        Ok(self.hostname.clone())
    }

    fn username(&mut self) -> Result<String> {
        self.asked.push("username");
        Ok(self.username.clone())
    }

    fn password(&mut self) -> Result<String> {
        self.asked.push("password");
        Ok(self.password.clone())
    }

    fn confirm_destruction(&mut self, _disk: &Disk) -> Result<()> {
        self.asked.push("confirm");
        if self.confirm {
            Ok(())
        } else {
            Err(InstallerError::Aborted)
        }
    }
}
