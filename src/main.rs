use std::process;

use clap::Parser;
use log::*;

use release_runner::{
    cli, launcher::ProcessLauncher, result::Result, runner,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_runner")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    let outcome = cli_args.load_env_file().and_then(|file_env| {
        let config = cli_args.runner_config(&file_env);
        runner::run(&config, &ProcessLauncher)
    });

    if let Err(err) = outcome {
        error!("error during release process: {err}");
        process::exit(err.exit_code());
    }

    Ok(())
}
