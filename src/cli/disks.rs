use clap::Parser;

/// Arguments for the disks command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List detected disks:\n    snowy-lab-installer disks\n\n\
                  Machine-readable output:\n    snowy-lab-installer disks --json")]
pub struct DisksArgs {
    /// Print the disks as a JSON array
    #[arg(long)]
    pub json: bool,
}
