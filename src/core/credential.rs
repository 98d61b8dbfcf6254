//! API credential.
//!
//! The token is owned by whoever builds the client and is attached to each
//! request explicitly. There is no process-wide token.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::ConfigError;

/// A personal access token.
///
/// Wiped from memory on drop and never printed.
#[derive(Clone)]
pub struct Token(Zeroizing<String>);

impl Token {
    /// Wrap a token string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = Zeroizing::new(token.into());
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(Self(Zeroizing::new(trimmed.to_string())))
    }

    /// The raw token, for building the Authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `Bearer <token>` header value.
    pub fn bearer(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("Bearer {}", self.expose()))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}
