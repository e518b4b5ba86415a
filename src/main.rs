//! snowy-lab-installer - bare-metal NixOS installer
//!
//! Detects the firmware boot mode, partitions and formats one operator-selected
//! disk, and drives `nixos-install` with a generated configuration and flake.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod disk;
mod error;
mod exec;
mod logging;
mod orchestrator;
mod poll;
mod progress;
mod prompt;
mod render;
mod system;
#[cfg(test)]
mod test_fixtures;
mod ui;

use cli::{Cli, Commands};
use console::Style;

fn main() {
    let mut cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = cli.config.clone();
    let command = cli.command_or_default();
    let is_install = matches!(command, Commands::Install(_));

    let result = match command {
        Commands::Install(args) => commands::install::run(config_path.as_deref(), args),
        Commands::Disks(args) => commands::disks::run(config_path.as_deref(), args),
        Commands::Plan(args) => commands::plan::run(config_path.as_deref(), args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        if is_install {
            println!(
                "{}",
                Style::new()
                    .red()
                    .bold()
                    .apply_to(format!("Installation failed error= {e}"))
            );
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}
