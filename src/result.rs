//! Result type for ambient setup.
//!
//! Startup steps outside a release run (installing the report handler,
//! initializing the logger) return this `color-eyre` result so failures get
//! colorized reports with context. Release runs themselves return
//! [`crate::error::RunnerError`].
//!
//! ```rust,ignore
//! use color_eyre::eyre::Context;
//! use release_runner::result::Result;
//!
//! fn setup() -> Result<()> {
//!     init_something().wrap_err("failed to initialize")?;
//!     Ok(())
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard ambient result type, an alias for `color_eyre::eyre::Result<T>`.
pub type Result<T> = EyreResult<T>;
