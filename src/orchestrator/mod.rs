//! The installation run, start to finish
//!
//! Stages run strictly in order and the first failure ends the run. Each
//! failure is wrapped with the stage it happened in so the operator sees
//! where things went wrong. Readiness waits never fail the run; they only
//! warn.

mod steps;

use crate::config::InstallerConfig;
use crate::disk::{Disk, PartitionPlan};
use crate::error::{InstallerError, Result, Stage, StageResultExt};
use crate::exec::CommandRunner;
use crate::progress::Countdown;
use crate::prompt::Prompter;
use crate::render::{TemplateContext, Templates};
use crate::system::BootMode;
use crate::ui;

/// Operator answers gathered before anything destructive happens
pub(crate) struct Selection {
    pub disk: Disk,
    pub hostname: String,
    pub username: String,
    pub password: String,
}

/// What a successful run did
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub disk: String,
    pub hostname: String,
    pub username: String,
    pub boot_mode: BootMode,
    pub partition_ready: bool,
    pub label_ready: bool,
}

/// Drives one installation against a single selected disk
pub struct Installer<'a> {
    config: &'a InstallerConfig,
    boot_mode: BootMode,
    runner: &'a mut dyn CommandRunner,
    prompter: &'a mut dyn Prompter,
    templates: Templates,
}

impl<'a> Installer<'a> {
    pub fn new(
        config: &'a InstallerConfig,
        boot_mode: BootMode,
        runner: &'a mut dyn CommandRunner,
        prompter: &'a mut dyn Prompter,
    ) -> Result<Self> {
        Ok(Self {
            config,
            boot_mode,
            runner,
            prompter,
            templates: Templates::new()?,
        })
    }

    /// Run every stage; `is_root` is the caller's privilege check result
    pub fn run(&mut self, is_root: bool) -> Result<InstallReport> {
        tracing::info!(boot_mode = ?self.boot_mode, "starting installation");

        if !is_root {
            return Err(InstallerError::NotRoot).in_stage(Stage::PrivilegeCheck);
        }
        self.check_mount_point().in_stage(Stage::MountPointCheck)?;

        let disks = self.detect_disks().in_stage(Stage::DiskDetection)?;
        let selection = self.collect(&disks).in_stage(Stage::Collect)?;

        let countdown = Countdown::new(self.config.countdown_secs);
        ui::info(&countdown.announcement());
        countdown.run();

        let plan = PartitionPlan::new(&selection.disk.name, self.boot_mode);
        self.partition(&plan).in_stage(Stage::Partition)?;
        let partition_ready = self.wait_for_partition(&plan);

        self.format(&plan).in_stage(Stage::Format)?;
        let label_ready = self.refresh_block_index(&plan);

        self.mount(&plan).in_stage(Stage::Mount)?;
        self.generate_hardware_config()
            .in_stage(Stage::GenerateConfig)?;
        self.write_password_file(&selection)
            .in_stage(Stage::PasswordFile)?;

        let context = TemplateContext {
            hostname: selection.hostname.clone(),
            username: selection.username.clone(),
            disk_name: selection.disk.name.clone(),
            is_efi: self.boot_mode.is_efi(),
        };
        self.write_install_config(&context)
            .in_stage(Stage::InstallConfig)?;
        self.install().in_stage(Stage::Install)?;
        self.remove_install_config()
            .in_stage(Stage::RemoveInstallConfig)?;
        self.write_final_config(&context)
            .in_stage(Stage::FinalConfig)?;

        tracing::info!(disk = %selection.disk.name, "installation finished");

        Ok(InstallReport {
            disk: selection.disk.name,
            hostname: selection.hostname,
            username: selection.username,
            boot_mode: self.boot_mode,
            partition_ready: partition_ready.is_ready(),
            label_ready: label_ready.is_ready(),
        })
    }
}
