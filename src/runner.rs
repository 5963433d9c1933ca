//! Release run: credential guard, tool invocation and outcome mapping.
use log::*;

use crate::{
    config::{NO_CI_FLAG, RunnerConfig},
    error::RunnerError,
    launcher::{ExitOutcome, Invocation, Launcher},
};

/// Build the release tool invocation for a validated config.
///
/// Returns `MissingCredential` when the token is absent or empty.
pub fn build_invocation(
    config: &RunnerConfig,
) -> Result<Invocation, RunnerError> {
    let token = config
        .credential()
        .ok_or_else(|| RunnerError::missing_credential(&config.token_var))?;

    let mut args = vec![NO_CI_FLAG.to_string()];
    args.extend(config.tool_args.iter().cloned());

    let mut envs = config.env.clone();
    envs.push((config.token_var.clone(), token.clone()));

    Ok(Invocation {
        program: config.tool.clone(),
        args,
        envs,
    })
}

/// Execute a release run: check the credential, launch the tool with inherited
/// stdio and map its exit status.
pub fn run(
    config: &RunnerConfig,
    launcher: &dyn Launcher,
) -> Result<(), RunnerError> {
    let invocation = build_invocation(config)?;

    info!("starting release process...");
    debug!("running: {}", invocation.command_line());

    let outcome = launcher.launch(&invocation)?;

    check_outcome(&invocation, outcome)?;

    info!("release completed successfully!");

    Ok(())
}

fn check_outcome(
    invocation: &Invocation,
    outcome: ExitOutcome,
) -> Result<(), RunnerError> {
    if outcome.success() {
        return Ok(());
    }

    let reason = match outcome.code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by signal".to_string(),
    };

    Err(RunnerError::subprocess(invocation.command_line(), reason))
}
