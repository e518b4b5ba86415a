//! Install command implementation
//!
//! Wires the real collaborators (host command runner, terminal prompts,
//! effective uid, firmware boot mode) into the [`Installer`] and runs it.

use std::path::Path;

use crate::cli::InstallArgs;
use crate::config::InstallerConfig;
use crate::error::Result;
use crate::exec::SystemRunner;
use crate::orchestrator::Installer;
use crate::prompt::TerminalPrompter;
use crate::system::{self, BootMode};
use crate::ui;

/// Settings file values with command line overrides applied
fn effective_config(config_path: Option<&Path>, args: &InstallArgs) -> Result<InstallerConfig> {
    let mut config = InstallerConfig::load(config_path)?;
    if let Some(secs) = args.countdown {
        config.countdown_secs = secs;
    }
    Ok(config)
}

/// Run install command
pub fn run(config_path: Option<&Path>, args: InstallArgs) -> Result<()> {
    let config = effective_config(config_path, &args)?;
    let boot_mode = BootMode::detect(&config.efi_firmware_dir);
    tracing::debug!(?config, ?boot_mode, "loaded installer settings");

    let mut runner = SystemRunner;
    let mut prompter = TerminalPrompter;
    let mut installer = Installer::new(&config, boot_mode, &mut runner, &mut prompter)?;
    let report = installer.run(system::is_root())?;

    ui::success(&format!(
        "Installed NixOS for {}@{} on {} ({} boot). Remove the installation media and reboot.",
        report.username, report.hostname, report.disk, report.boot_mode
    ));
    if !(report.partition_ready && report.label_ready) {
        ui::warning("Some devices were slow to appear; check the boot before relying on it.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstallerError;

    #[test]
    fn test_countdown_override() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("installer.yaml");
        std::fs::write(&path, "countdown_secs: 30\nmount_point: /target\n").unwrap();

        let config = effective_config(Some(&path), &InstallArgs { countdown: Some(0) }).unwrap();
        assert_eq!(config.countdown_secs, 0);
        assert_eq!(config.mount_point, std::path::PathBuf::from("/target"));

        let config = effective_config(Some(&path), &InstallArgs::default()).unwrap();
        assert_eq!(config.countdown_secs, 30);
    }

    #[test]
    fn test_missing_settings_file_fails_before_anything_runs() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = run(
            Some(&temp.path().join("missing.yaml")),
            InstallArgs::default(),
        )
        .unwrap_err();
        assert!(matches!(err, InstallerError::ConfigReadFailed { .. }));
    }
}
