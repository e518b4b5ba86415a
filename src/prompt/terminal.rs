//! Interactive prompts on the operator's terminal

use console::Style;
use inquire::{Password, PasswordDisplayMode, Text};

use super::{
    Prompter, ask_until, confirm_password, parse_disk_index, validate_confirmation,
    validate_hostname, validate_username,
};
use crate::disk::Disk;
use crate::error::Result;

/// Prompter backed by `inquire`
#[derive(Debug, Default)]
pub struct TerminalPrompter;

fn report_invalid(message: &str) {
    println!("{}", Style::new().red().apply_to(message));
}

fn read_masked(message: &str) -> Result<String> {
    Ok(Password::new(message)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?)
}

impl Prompter for TerminalPrompter {
    fn select_disk(&mut self, disks: &[Disk]) -> Result<usize> {
        let message = format!(
            "Which disk number would you like to install onto (1-{})?",
            disks.len()
        );
        ask_until(
            || Ok(Text::new(&message).prompt()?),
            |input| parse_disk_index(input, disks.len()),
            report_invalid,
        )
    }

    fn hostname(&mut self) -> Result<String> {
        ask_until(
            || Ok(Text::new("Hostname?").prompt()?),
            validate_hostname,
            report_invalid,
        )
    }

    fn username(&mut self) -> Result<String> {
        ask_until(
            || Ok(Text::new("Username?").prompt()?),
            validate_username,
            report_invalid,
        )
    }

    fn password(&mut self) -> Result<String> {
        loop {
            let first = read_masked("User password?")?;
            let second = read_masked("Validate password?")?;
            match confirm_password(&first, &second) {
                Ok(password) => return Ok(password),
                Err(message) => report_invalid(&message),
            }
        }
    }

    fn confirm_destruction(&mut self, _disk: &Disk) -> Result<()> {
        ask_until(
            || {
                Ok(Text::new(
                    "Are you sure you'd like to proceed? If so, please type 'yes' in full, otherwise Ctrl-C:",
                )
                .prompt()?)
            },
            validate_confirmation,
            report_invalid,
        )
    }
}
