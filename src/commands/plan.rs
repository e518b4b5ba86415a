//! Plan command implementation
//!
//! Prints what `install` would do to a disk. Nothing is executed.

use std::path::Path;

use crate::cli::PlanArgs;
use crate::config::InstallerConfig;
use crate::disk::{self, PartitionPlan};
use crate::error::{InstallerError, Result};
use crate::system::BootMode;
use crate::ui;

fn build_plan(config: &InstallerConfig, args: &PlanArgs) -> Result<PartitionPlan> {
    let disks = disk::enumerate_disks(&config.sys_block_dir)?;
    if !disks.iter().any(|d| d.name == args.disk) {
        return Err(InstallerError::UnknownDisk {
            name: args.disk.clone(),
        });
    }

    let boot_mode = args
        .boot_mode
        .map_or_else(|| BootMode::detect(&config.efi_firmware_dir), BootMode::from);
    Ok(PartitionPlan::new(&args.disk, boot_mode))
}

/// Run plan command
pub fn run(config_path: Option<&Path>, args: PlanArgs) -> Result<()> {
    let config = InstallerConfig::load(config_path)?;
    let plan = build_plan(&config, &args)?;
    ui::display::display_plan(&plan, &config);
    Ok(())
}
