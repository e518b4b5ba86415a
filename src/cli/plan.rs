use clap::{Parser, ValueEnum};

use crate::system::BootMode;

/// Boot mode as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootModeArg {
    Efi,
    Legacy,
}

impl From<BootModeArg> for BootMode {
    fn from(arg: BootModeArg) -> Self {
        match arg {
            BootModeArg::Efi => BootMode::Efi,
            BootModeArg::Legacy => BootMode::Legacy,
        }
    }
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show what install would do to sda:\n    snowy-lab-installer plan sda\n\n\
                  Plan for an EFI machine from anywhere:\n    snowy-lab-installer plan nvme0n1 --boot-mode efi")]
pub struct PlanArgs {
    /// Disk name as listed by `disks` (e.g. sda, nvme0n1)
    pub disk: String,

    /// Override firmware boot-mode detection
    #[arg(long, value_enum, value_name = "MODE")]
    pub boot_mode: Option<BootModeArg>,
}
