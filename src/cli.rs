//! CLI argument parsing and credential resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use clap::Parser;
use log::*;
use secrecy::SecretString;

use crate::{
    config::{DEFAULT_ENV_FILE, DEFAULT_TOKEN_VAR, DEFAULT_TOOL, RunnerConfig},
    error::RunnerError,
};

/// Check the release token, then run the release tool.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long)]
    /// Release token. Falls back to the variable named by --token-var.
    pub token: Option<String>,

    #[arg(long, default_value = DEFAULT_TOKEN_VAR)]
    /// Environment variable that holds the token, for lookup and for the
    /// release tool.
    pub token_var: String,

    #[arg(long, default_value = DEFAULT_TOOL)]
    /// Release tool to run.
    pub tool: String,

    #[arg(long)]
    /// Dotenv file to load before resolving the token. Defaults to .env in
    /// the current directory when present.
    pub env_file: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,

    #[arg(last = true)]
    /// Extra arguments passed to the release tool.
    pub tool_args: Vec<String>,
}

/// Variables read from a dotenv file, in file order.
pub type FileEnv = Vec<(String, String)>;

impl Args {
    /// Read the dotenv file without touching the process environment.
    ///
    /// A missing default file is fine and bad lines in it are skipped with a
    /// warning; an explicitly requested file must exist and parse cleanly.
    pub fn load_env_file(&self) -> Result<FileEnv, RunnerError> {
        match &self.env_file {
            Some(path) => read_env_file(path, true),
            None => {
                let path = PathBuf::from(DEFAULT_ENV_FILE);
                if !path.exists() {
                    debug!("no {} file found, skipping", path.display());
                    return Ok(vec![]);
                }
                read_env_file(&path, false)
            }
        }
    }

    /// Build the runner config from the process environment and dotenv
    /// entries.
    pub fn runner_config(&self, file_env: &[(String, String)]) -> RunnerConfig {
        self.runner_config_with(file_env, |key| env::var(key).ok())
    }

    /// Build the runner config with `lookup` standing in for the process
    /// environment.
    ///
    /// Token precedence: `--token`, then `lookup`, then the dotenv file.
    /// Dotenv entries already present in `lookup` are not forwarded.
    pub fn runner_config_with(
        &self,
        file_env: &[(String, String)],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> RunnerConfig {
        let mut token = self.token.clone().unwrap_or_default();

        if token.is_empty()
            && let Some(env_var_token) = lookup(&self.token_var)
        {
            token = env_var_token;
        }

        let mut forwarded = vec![];

        for (key, value) in file_env {
            if lookup(key).is_some() {
                continue;
            }
            if *key == self.token_var {
                if token.is_empty() {
                    token = value.clone();
                }
                continue;
            }
            forwarded.push((key.clone(), SecretString::from(value.clone())));
        }

        RunnerConfig {
            token: (!token.is_empty()).then(|| SecretString::from(token)),
            token_var: self.token_var.clone(),
            tool: self.tool.clone(),
            tool_args: self.tool_args.clone(),
            env: forwarded,
        }
    }
}

/// Names and values the OS accepts as environment entries.
fn is_valid_entry(key: &str, value: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0']) && !value.contains('\0')
}

fn read_env_file(path: &Path, explicit: bool) -> Result<FileEnv, RunnerError> {
    let env_file_error = |source: dotenvy::Error| RunnerError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if explicit => return Err(env_file_error(err)),
        Err(err) => {
            warn!("ignoring {}: {err}", path.display());
            return Ok(vec![]);
        }
    };

    let mut entries = vec![];

    for item in iter {
        match item {
            Ok((key, value)) if is_valid_entry(&key, &value) => {
                entries.push((key, value));
            }
            Ok((key, _)) if explicit => {
                return Err(RunnerError::invalid_env_entry(path, key));
            }
            Ok((key, _)) => {
                warn!(
                    "skipping invalid entry {key:?} in {}: names and values must not contain NUL bytes",
                    path.display()
                );
            }
            Err(err) if explicit => return Err(env_file_error(err)),
            Err(dotenvy::Error::Io(err)) => {
                warn!("stopped reading {}: {err}", path.display());
                break;
            }
            Err(err) => {
                warn!("skipping bad line in {}: {err}", path.display());
            }
        }
    }

    debug!("read {} entries from {}", entries.len(), path.display());

    Ok(entries)
}
