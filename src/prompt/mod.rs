//! Operator prompts
//!
//! Each prompt is a read-validate-retry loop. Invalid input is reported and
//! asked again, indefinitely; only a failure to read at all (closed stdin,
//! Ctrl-C) leaves the loop, as an error.

pub mod terminal;

pub use terminal::TerminalPrompter;

use lazy_regex::regex_is_match;

use crate::disk::Disk;
use crate::error::Result;

/// The only input accepted by the destructive-step confirmation
pub const CONFIRMATION_PHRASE: &str = "yes";

/// Collects the operator's choices for an installation run
pub trait Prompter {
    /// 0-based index into `disks`
    fn select_disk(&mut self, disks: &[Disk]) -> Result<usize>;

    fn hostname(&mut self) -> Result<String>;

    fn username(&mut self) -> Result<String>;

    fn password(&mut self) -> Result<String>;

    /// Returns only once the operator typed the confirmation phrase
    fn confirm_destruction(&mut self, disk: &Disk) -> Result<()>;
}

/// Read input until `validate` accepts it, calling `on_invalid` with the
/// rejection message after each refusal.
pub fn ask_until<T>(
    mut read: impl FnMut() -> Result<String>,
    mut validate: impl FnMut(&str) -> std::result::Result<T, String>,
    mut on_invalid: impl FnMut(&str),
) -> Result<T> {
    loop {
        let input = read()?;
        match validate(&input) {
            Ok(value) => return Ok(value),
            Err(message) => on_invalid(&message),
        }
    }
}

/// Parse a 1-based disk number into a 0-based index
pub fn parse_disk_index(input: &str, disk_count: usize) -> std::result::Result<usize, String> {
    let number: usize = input
        .trim()
        .parse()
        .map_err(|_| "Input must be a number".to_string())?;

    if number == 0 || number > disk_count {
        return Err(format!("Input must be between 1-{disk_count}"));
    }

    Ok(number - 1)
}

/// POSIX-style login name: lower-case letter or underscore first, then lower-case
/// letters, digits, underscores or dashes, optionally ending in `$`
pub fn validate_username(input: &str) -> std::result::Result<String, String> {
    if regex_is_match!(r"^[a-z_][a-z0-9_-]*\$?$", input) {
        Ok(input.to_string())
    } else {
        Err("Usernames must begin with a lower case letter or an underscore, \
             followed by lower case letters, digits, underscores, or dashes. \
             They can end with a dollar sign."
            .to_string())
    }
}

/// Hostnames are taken as typed, minus surrounding whitespace
pub fn validate_hostname(input: &str) -> std::result::Result<String, String> {
    Ok(input.trim().to_string())
}

/// Both password entries must be identical
pub fn confirm_password(first: &str, second: &str) -> std::result::Result<String, String> {
    if first == second {
        Ok(first.to_string())
    } else {
        Err("Password does not match".to_string())
    }
}

/// Only the exact confirmation phrase proceeds
pub fn validate_confirmation(input: &str) -> std::result::Result<(), String> {
    if input == CONFIRMATION_PHRASE {
        Ok(())
    } else {
        Err(format!("Please type '{CONFIRMATION_PHRASE}' in full to proceed"))
    }
}
