use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    snowy-lab-installer completions bash > ~/.bash_completion.d/snowy-lab-installer\n\n\
                  Generate zsh completions:\n    snowy-lab-installer completions zsh > ~/.zfunc/_snowy-lab-installer\n\n\
                  Generate fish completions:\n    snowy-lab-installer completions fish > ~/.config/fish/completions/snowy-lab-installer.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
