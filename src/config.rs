//! Runner configuration.
//!
//! Built once by the entry point and handed to the runner, so the runner never
//! reads the process environment itself.
use secrecy::{ExposeSecret, SecretString};

/// Environment variable that carries the release token.
pub const DEFAULT_TOKEN_VAR: &str = "GH_TOKEN";

/// Release tool invoked when none is configured.
pub const DEFAULT_TOOL: &str = "semantic-release";

/// Flag that turns off the release tool's own CI detection. Always passed.
pub const NO_CI_FLAG: &str = "--no-ci";

/// Default dotenv file, resolved against the current directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Everything a single release run needs.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Release token as found at startup, if any.
    pub token: Option<SecretString>,
    /// Variable name the token is injected under in the child environment.
    pub token_var: String,
    /// Release tool program.
    pub tool: String,
    /// Extra arguments appended after the CI flag.
    pub tool_args: Vec<String>,
    /// Dotenv variables passed to the child alongside the token.
    pub env: Vec<(String, SecretString)>,
}

impl RunnerConfig {
    /// Returns the token only when it is present and non-empty.
    pub fn credential(&self) -> Option<&SecretString> {
        self.token
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_var: DEFAULT_TOKEN_VAR.into(),
            tool: DEFAULT_TOOL.into(),
            tool_args: vec![],
            env: vec![],
        }
    }
}
