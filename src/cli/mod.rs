//! CLI definitions using clap derive API
//!
//! Argument types live in one submodule per command:
//! - install: Install command arguments
//! - disks: Disk listing arguments
//! - plan: Partition plan preview arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod disks;
pub mod install;
pub mod plan;

pub use completions::CompletionsArgs;
pub use disks::DisksArgs;
pub use install::InstallArgs;
pub use plan::{BootModeArg, PlanArgs};

/// Snowy lab installer - bare-metal NixOS installation
///
/// Partitions, formats and installs NixOS onto one local disk.
#[derive(Parser, Debug)]
#[command(
    name = "snowy-lab-installer",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Interactive bare-metal NixOS installer for snowy lab nodes",
    long_about = "snowy-lab-installer detects the firmware boot mode, lets you pick a disk, \
                  partitions and formats it, and runs nixos-install with a generated \
                  configuration and flake. Running it without a subcommand starts an install.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  sudo snowy-lab-installer                 \x1b[90m# Install interactively\x1b[0m\n   \
                  snowy-lab-installer disks                \x1b[90m# List detected disks\x1b[0m\n   \
                  snowy-lab-installer plan sda             \x1b[90m# Preview commands for sda\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// YAML settings file (every key optional)
    #[arg(long, short = 'c', global = true, env = "SNOWY_INSTALLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install NixOS onto a disk (default)
    Install(InstallArgs),

    /// List installable disks
    Disks(DisksArgs),

    /// Show the partition plan and commands for a disk without running them
    Plan(PlanArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Cli {
    /// The subcommand to run; a bare invocation installs
    pub fn command_or_default(&mut self) -> Commands {
        self.command
            .take()
            .unwrap_or_else(|| Commands::Install(InstallArgs::default()))
    }
}
