//! Configuration file management.
//!
//! Handles reading and validating the optional `config.toml`. Every field has
//! a default, so a missing file is not an error unless its path was given
//! explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote API settings
    pub api: ApiConfig,
}

/// Remote API section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the REST API
    pub url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Page size for listing endpoints
    pub per_page: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_API_URL.to_string(),
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            per_page: constants::MAX_PER_PAGE,
        }
    }
}

impl Config {
    /// Default config file path under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load configuration.
    ///
    /// Looks at `explicit`, then `$SECRETSYNC_CONFIG`, then the default path.
    /// An explicitly named file must exist; the default one may be absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if an explicit file cannot be read,
    /// `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if a value fails validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(constants::CONFIG_ENV).map(PathBuf::from);
        let (path, required) = match (explicit, from_env) {
            (Some(p), _) => (Some(p.to_path_buf()), true),
            (None, Some(p)) => (Some(p), true),
            (None, None) => (Self::default_path(), false),
        };

        let Some(path) = path else {
            debug!("no config directory, using defaults");
            return Ok(Self::default());
        };

        if !required && !path.exists() {
            debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::InvalidValue`.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api.url = url.into();
        self
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Validate the configuration values
    ///
    /// Checks:
    /// - API URL parses and uses http or https
    /// - Timeout is non-zero
    /// - Page size is between 1 and 100
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        let url = reqwest::Url::parse(&self.api.url).map_err(|e| ConfigError::InvalidValue {
            field: "api.url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api.url",
                reason: format!("unsupported scheme: {}", url.scheme()),
            }
            .into());
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        if self.api.per_page == 0 || self.api.per_page > constants::MAX_PER_PAGE {
            return Err(ConfigError::InvalidValue {
                field: "api.per_page",
                reason: format!("must be between 1 and {}", constants::MAX_PER_PAGE),
            }
            .into());
        }

        Ok(())
    }
}
