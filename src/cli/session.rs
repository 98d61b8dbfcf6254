//! Client construction from CLI flags, config file and token prompt.

use std::path::PathBuf;

use tracing::debug;

use crate::core::config::Config;
use crate::core::credential::Token;
use crate::core::store::GitHub;
use crate::error::{ConfigError, Result};

/// Connection settings gathered from the command line.
pub struct Session {
    token: Option<String>,
    api_url: Option<String>,
    config: Option<PathBuf>,
}

impl Session {
    /// Capture the global flags.
    pub fn new(token: Option<String>, api_url: Option<String>, config: Option<PathBuf>) -> Self {
        Self {
            token,
            api_url,
            config,
        }
    }

    /// Build an API client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file is invalid or no token is
    /// available.
    pub fn client(&self) -> Result<GitHub> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.clone());
        }

        let token = self.token()?;
        GitHub::new(&config, token)
    }

    /// Resolve the token: flag or environment, else a hidden prompt when
    /// stdin is a terminal.
    fn token(&self) -> Result<Token> {
        if let Some(token) = &self.token {
            debug!("using token from flag or environment");
            return Ok(Token::new(token.as_str())?);
        }

        if !atty::is(atty::Stream::Stdin) {
            return Err(ConfigError::MissingToken.into());
        }

        let entered = dialoguer::Password::new()
            .with_prompt("GitHub token")
            .interact()
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        Ok(Token::new(entered)?)
    }
}
