use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Install interactively:\n    sudo snowy-lab-installer install\n\n\
                   Skip the countdown:\n    sudo snowy-lab-installer install --countdown 0\n\n\
                   Use a settings file:\n    sudo snowy-lab-installer --config installer.yaml install")]
pub struct InstallArgs {
    /// Seconds to wait after confirmation before the disk is touched
    #[arg(long, value_name = "SECS")]
    pub countdown: Option<u64>,
}
