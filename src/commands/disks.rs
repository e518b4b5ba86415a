//! Disks command implementation

use std::path::Path;

use crate::cli::DisksArgs;
use crate::config::InstallerConfig;
use crate::disk::{self, Disk};
use crate::error::Result;
use crate::ui;

fn to_json(disks: &[Disk]) -> Result<String> {
    Ok(serde_json::to_string_pretty(disks)?)
}

/// Run disks command
pub fn run(config_path: Option<&Path>, args: DisksArgs) -> Result<()> {
    let config = InstallerConfig::load(config_path)?;
    let disks = disk::enumerate_disks(&config.sys_block_dir)?;

    if args.json {
        println!("{}", to_json(&disks)?);
        return Ok(());
    }

    if disks.is_empty() {
        ui::warning(&format!(
            "No installable disks found under {}",
            config.sys_block_dir.display()
        ));
        return Ok(());
    }

    ui::heading("Detected the following disks:");
    ui::display::display_disks(&disks);
    Ok(())
}
