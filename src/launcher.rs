//! Child process launching for the release tool.
use std::process::{Command, Stdio};

use log::*;
use secrecy::{ExposeSecret, SecretString};

use crate::error::RunnerError;

/// A fully built release tool command line.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Added to the inherited parent environment.
    pub envs: Vec<(String, SecretString)>,
}

impl Invocation {
    /// Program and arguments joined for display. Never includes env values.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit status of a finished child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// `None` when the child was killed by a signal.
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an invocation to completion.
#[cfg_attr(test, mockall::automock)]
pub trait Launcher {
    fn launch(
        &self,
        invocation: &Invocation,
    ) -> Result<ExitOutcome, RunnerError>;
}

/// Spawns the real process with stdin, stdout and stderr shared with ours
/// and blocks until it exits.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(
        &self,
        invocation: &Invocation,
    ) -> Result<ExitOutcome, RunnerError> {
        let program = which::which(&invocation.program).map_err(|err| {
            RunnerError::subprocess(
                invocation.command_line(),
                format!(
                    "cannot be launched: {} not found on PATH: {err}",
                    invocation.program
                ),
            )
        })?;

        debug!("resolved {} to {}", invocation.program, program.display());

        let mut command = Command::new(&program);
        command
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        for (key, value) in &invocation.envs {
            command.env(key, value.expose_secret());
        }

        let status = command.status().map_err(|err| {
            RunnerError::subprocess(
                invocation.command_line(),
                format!("cannot be launched: {err}"),
            )
        })?;

        debug!("{} exited: {status}", invocation.program);

        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}
