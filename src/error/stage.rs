//! Orchestrator stages and stage attribution for errors

use std::fmt;

use super::{InstallerError, Result};

/// A hard-gated step of the installation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PrivilegeCheck,
    MountPointCheck,
    DiskDetection,
    Collect,
    Partition,
    Format,
    Mount,
    GenerateConfig,
    PasswordFile,
    InstallConfig,
    Install,
    RemoveInstallConfig,
    FinalConfig,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::PrivilegeCheck => "Failed checking privileges",
            Stage::MountPointCheck => "Failed checking mount point",
            Stage::DiskDetection => "Failed detecting disks",
            Stage::Collect => "Failed collecting installation details",
            Stage::Partition => "Failed running parted",
            Stage::Format => "Failed making boot partitions",
            Stage::Mount => "Failed mounting nixos disk",
            Stage::GenerateConfig => "Failed generating nixos config",
            Stage::PasswordFile => "Failed generating user pass file",
            Stage::InstallConfig => "Failed generating nixos install config",
            Stage::Install => "Failed installing",
            Stage::RemoveInstallConfig => "Failed removing installation config",
            Stage::FinalConfig => "Failed generating snowy lab config",
        };
        f.write_str(text)
    }
}

/// Attach a stage to the error of a result
pub trait StageResultExt<T> {
    fn in_stage(self, stage: Stage) -> Result<T>;
}

impl<T> StageResultExt<T> for Result<T> {
    fn in_stage(self, stage: Stage) -> Result<T> {
        self.map_err(|source| InstallerError::Stage {
            stage,
            source: Box::new(source),
        })
    }
}
