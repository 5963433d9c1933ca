pub mod cli;
pub mod config;
pub mod error;
pub mod launcher;
pub mod result;
pub mod runner;

pub use cli::Args;
pub use config::RunnerConfig;
pub use error::RunnerError;
pub use launcher::{ExitOutcome, Invocation, Launcher, ProcessLauncher};
