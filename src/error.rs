//! Error types for release runs.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Exit code used for every failed run, regardless of the child's own code.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Main error type for release runner operations.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("{var} not found in environment or .env file")]
    MissingCredential { var: String },

    #[error("release command `{command}` failed: {reason}")]
    SubprocessFailure { command: String, reason: String },

    #[error("failed to load env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error(
        "invalid entry {key:?} in env file {}: names and values must not contain NUL bytes",
        path.display()
    )]
    InvalidEnvEntry { path: PathBuf, key: String },
}

impl RunnerError {
    /// Create a missing credential error for the given variable name
    pub fn missing_credential(var: impl Into<String>) -> Self {
        Self::MissingCredential { var: var.into() }
    }

    /// Create a subprocess failure error with context
    pub fn subprocess(
        command: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::SubprocessFailure {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid env file entry error
    pub fn invalid_env_entry(path: &Path, key: impl Into<String>) -> Self {
        Self::InvalidEnvEntry {
            path: path.to_path_buf(),
            key: key.into(),
        }
    }

    /// Process exit code to report for this error.
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}
