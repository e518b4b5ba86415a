//! Individual steps of an installation run

use std::fs::{self, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;

use super::{Installer, Selection};
use crate::config::ROOT_LABEL;
use crate::disk::partition::untested_device_warning;
use crate::disk::{self, Disk, PartitionPlan};
use crate::error::{self, InstallerError, Result};
use crate::exec::Cmd;
use crate::poll::{self, Readiness};
use crate::render::{FINAL_CONFIG, FLAKE, INSTALL_CONFIG, TemplateContext};
use crate::system::BootMode;
use crate::ui;

impl Installer<'_> {
    pub(super) fn check_mount_point(&mut self) -> Result<()> {
        let mount_point = self.config.mount_point.display().to_string();
        let probe = Cmd::new("mountpoint").arg(mount_point.as_str());
        if self.runner.probe(&probe) {
            return Err(InstallerError::MountPointBusy { path: mount_point });
        }
        Ok(())
    }

    pub(super) fn detect_disks(&self) -> Result<Vec<Disk>> {
        ui::heading("\n\nDetected the following disks:\n");
        let disks = disk::enumerate_disks(&self.config.sys_block_dir)?;
        if disks.is_empty() {
            return Err(InstallerError::NoDisksFound {
                path: self.config.sys_block_dir.display().to_string(),
            });
        }
        ui::display::display_disks(&disks);
        println!();
        Ok(disks)
    }

    pub(super) fn collect(&mut self, disks: &[Disk]) -> Result<Selection> {
        let index = self.prompter.select_disk(disks)?;
        let disk = disks
            .get(index)
            .cloned()
            .ok_or_else(|| InstallerError::UnknownDisk {
                name: format!("#{}", index + 1),
            })?;
        ui::info(&format!("Selected {} disk", disk.name));

        let hostname = self.prompter.hostname()?;
        ui::info(&format!("Node hostname: {hostname}"));

        let username = self.prompter.username()?;
        ui::info(&format!("Your username: {username}"));

        let password = self.prompter.password()?;
        ui::info("Password accepted.");

        let device = disk.device_path(&self.config.dev_dir);
        ui::info(&format!(
            "Proceeding will entail repartitioning and formatting {device}."
        ));
        ui::danger(&format!("!!! ALL DATA ON {device} WILL BE LOST !!!"));
        self.prompter.confirm_destruction(&disk)?;

        Ok(Selection {
            disk,
            hostname,
            username,
            password,
        })
    }

    pub(super) fn partition(&mut self, plan: &PartitionPlan) -> Result<()> {
        match self.boot_mode {
            BootMode::Efi => ui::info(
                "Detected EFI/UEFI boot. Proceeding with a GPT partition scheme...",
            ),
            BootMode::Legacy => ui::info(
                "Did not detect an EFI/UEFI boot. Proceeding with a legacy MBR partitioning scheme...",
            ),
        }
        if plan.has_untested_naming() {
            ui::warning(&untested_device_warning(&plan.disk));
        }

        for cmd in plan.parted_commands(&self.config.dev_dir) {
            self.runner.run(&cmd)?;
        }
        Ok(())
    }

    pub(super) fn wait_for_partition(&self, plan: &PartitionPlan) -> Readiness {
        let node = self.config.device_path(&plan.node(1).name);
        let outcome = poll::wait_for_path(&node, self.config.poll);
        match outcome {
            Readiness::Ready { attempt } => {
                tracing::info!(node = %node.display(), attempt, "partition node is present");
            }
            Readiness::TimedOut => ui::warning(&format!(
                "Waited for {} to show up but it never did. Things may break.",
                node.display()
            )),
        }
        outcome
    }

    pub(super) fn format(&mut self, plan: &PartitionPlan) -> Result<()> {
        for cmd in plan.format_commands(&self.config.dev_dir) {
            self.runner.run(&cmd)?;
        }
        Ok(())
    }

    pub(super) fn refresh_block_index(&mut self, plan: &PartitionPlan) -> Readiness {
        let disk_path = self.config.device_path(&plan.disk).display().to_string();
        let outcome = poll::refresh_until_label(
            &mut *self.runner,
            &disk_path,
            &self.config.label_path(ROOT_LABEL),
            self.config.poll,
        );
        match outcome {
            Readiness::Ready { attempt } => {
                tracing::info!(disk = %disk_path, attempt, "root label is present");
            }
            Readiness::TimedOut => ui::warning(&format!(
                "Failed to re-read the block index on {disk_path}. Things may break."
            )),
        }
        outcome
    }

    pub(super) fn mount(&mut self, plan: &PartitionPlan) -> Result<()> {
        for cmd in plan.mount_commands(&self.config.label_dir, &self.config.mount_point) {
            self.runner.run(&cmd)?;
        }
        Ok(())
    }

    pub(super) fn generate_hardware_config(&mut self) -> Result<()> {
        let root = self.config.mount_point.display().to_string();
        self.runner
            .run(&Cmd::new("nixos-generate-config").args(["--root", root.as_str()]))
    }

    /// `mkpasswd` output lands in a 0600 file named after the user
    pub(super) fn write_password_file(&mut self, selection: &Selection) -> Result<()> {
        let path = self.config.password_file(&selection.username);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&path)
            .map_err(|e| crate::file_error_context!("Failed to create", path.display(), e))?;
        let handle = file.try_clone()?;

        let cmd = Cmd::new("mkpasswd")
            .arg("--method=sha-512")
            .secret_arg(selection.password.as_str());
        self.runner.run_with_output(&cmd, file)?;

        handle
            .sync_all()
            .map_err(|e| crate::file_error_context!("Failed to sync", path.display(), e))
    }

    pub(super) fn write_install_config(&self, context: &TemplateContext) -> Result<()> {
        let path = self.config.target_config_dir().join(FINAL_CONFIG);
        self.templates.write(INSTALL_CONFIG, context, &path)
    }

    pub(super) fn install(&mut self) -> Result<()> {
        self.runner
            .run(&Cmd::new("nixos-install").arg("--no-root-passwd"))
    }

    pub(super) fn remove_install_config(&self) -> Result<()> {
        let path = self.config.target_config_dir().join(FINAL_CONFIG);
        fs::remove_file(&path)
            .map_err(|e| error::fs::remove_failed(path.display().to_string(), e.to_string()))
    }

    pub(super) fn write_final_config(&self, context: &TemplateContext) -> Result<()> {
        let dir = self.config.target_config_dir();
        self.templates
            .write(FINAL_CONFIG, context, &dir.join(FINAL_CONFIG))?;
        self.templates.write(FLAKE, context, &dir.join(FLAKE))
    }
}
