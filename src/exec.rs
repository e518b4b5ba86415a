//! Running external privileged tools
//!
//! Every invocation is echoed as `>>> program args` before it runs, and the
//! child's stdout/stderr go straight to the operator's terminal. Success is
//! decided by the exit status alone. Nothing here retries.

use std::fmt;
use std::fs::File;
use std::process::{Command, Stdio};

use console::Style;

use crate::error::{self, Result};

/// A single argument, optionally hidden from the echoed command line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Arg {
    value: String,
    secret: bool,
}

/// An external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<Arg>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            secret: false,
        });
        self
    }

    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self = self.arg(value);
        }
        self
    }

    /// Argument passed to the program but left out of the echo
    pub fn secret_arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            secret: true,
        });
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument vector, secrets included
    pub fn argv(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.value.as_str()).collect()
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(self.argv());
        command
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in self.args.iter().filter(|a| !a.secret) {
            write!(f, " {}", arg.value)?;
        }
        Ok(())
    }
}

/// Seam between the installer and the processes it spawns
pub trait CommandRunner {
    /// Run with output streamed to the terminal; fail on spawn error or non-zero exit
    fn run(&mut self, cmd: &Cmd) -> Result<()>;

    /// Run silently and report whether it exited successfully
    fn probe(&mut self, cmd: &Cmd) -> bool;

    /// Run with stdout redirected into `output`, stderr streamed
    fn run_with_output(&mut self, cmd: &Cmd, output: File) -> Result<()>;
}

/// Runs commands on the host
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn echo(cmd: &Cmd) {
        println!("{}", Style::new().dim().apply_to(format!(">>> {cmd}")));
    }

    fn wait(cmd: &Cmd, mut command: Command) -> Result<()> {
        let status = command
            .status()
            .map_err(|e| error::command::spawn_failed(cmd.to_string(), &e))?;

        if !status.success() {
            return Err(error::command::exit_failed(
                cmd.to_string(),
                status.to_string(),
            ));
        }

        Ok(())
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<()> {
        Self::echo(cmd);
        tracing::debug!(program = cmd.program(), "running command");

        let mut command = cmd.to_command();
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        Self::wait(cmd, command)
    }

    fn probe(&mut self, cmd: &Cmd) -> bool {
        tracing::debug!(command = %cmd, "probing");

        let mut command = cmd.to_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        match command.status() {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::debug!(command = %cmd, error = %e, "probe could not start");
                false
            }
        }
    }

    fn run_with_output(&mut self, cmd: &Cmd, output: File) -> Result<()> {
        Self::echo(cmd);
        tracing::debug!(program = cmd.program(), "running command with redirected stdout");

        let mut command = cmd.to_command();
        command
            .stdout(Stdio::from(output))
            .stderr(Stdio::inherit());
        Self::wait(cmd, command)
    }
}
