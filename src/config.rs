//! Runtime configuration.
//!
//! All settings come from `KEYCUDDLE_*` environment variables; the API
//! key and database URL are required, everything else has a default.

use std::fmt;
use std::path::PathBuf;

/// Default Identity Toolkit endpoint for sign-in and sign-up.
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";

/// Default tracing filter when `KEYCUDDLE_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "keycuddle=info";

/// A required environment variable is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing required environment variable {}", self.variable)
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration.
///
/// Use the builder pattern to customize, or [`Config::from_env`] to read
/// everything from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Web API key passed to the Identity Toolkit endpoints.
    pub api_key: String,
    /// Base URL of the auth service (override for tests).
    pub auth_url: String,
    /// Base URL of the realtime database, without a trailing slash.
    pub database_url: String,
    /// Tracing filter directive, `KEYCUDDLE_LOG` or the default.
    pub log_filter: String,
    /// Directory the log file is written to. None disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Create a config with the given required values and defaults for
    /// the rest.
    pub fn new(api_key: impl Into<String>, database_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            database_url: trim_trailing_slash(database_url.into()),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_dir: default_log_dir(),
        }
    }

    /// Set the auth service base URL.
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = trim_trailing_slash(url.into());
        self
    }

    /// Set the tracing filter.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Set or disable the log directory.
    pub fn with_log_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.log_dir = dir;
        self
    }

    /// Read configuration from `KEYCUDDLE_*` environment variables.
    ///
    /// `KEYCUDDLE_API_KEY` and `KEYCUDDLE_DATABASE_URL` are required;
    /// `KEYCUDDLE_AUTH_URL` and `KEYCUDDLE_LOG` are optional overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("KEYCUDDLE_API_KEY").map_err(|_| ConfigError {
            variable: "KEYCUDDLE_API_KEY",
        })?;
        let database_url = std::env::var("KEYCUDDLE_DATABASE_URL").map_err(|_| ConfigError {
            variable: "KEYCUDDLE_DATABASE_URL",
        })?;

        let mut config = Config::new(api_key, database_url);
        if let Ok(url) = std::env::var("KEYCUDDLE_AUTH_URL") {
            config = config.with_auth_url(url);
        }
        if let Ok(filter) = std::env::var("KEYCUDDLE_LOG") {
            config = config.with_log_filter(filter);
        }
        Ok(config)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("keycuddle"))
}
