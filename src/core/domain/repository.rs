//! Repository and organization types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ValidationError};

/// A repository identity in `owner/name` form.
///
/// Scopes every remote secret operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName {
    owner: String,
    name: String,
}

impl RepoName {
    /// Parse and validate an `owner/name` string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRepo` if the string does not have
    /// exactly two non-empty parts or contains characters GitHub does not
    /// allow in owner or repository names.
    pub fn parse(full_name: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidRepo {
            repo: full_name.to_string(),
            reason: reason.to_string(),
        };

        let (owner, name) = full_name
            .trim()
            .split_once('/')
            .ok_or_else(|| invalid("expected owner/name"))?;

        if owner.is_empty() || name.is_empty() {
            return Err(invalid("owner and name must both be non-empty"));
        }
        if name.contains('/') {
            return Err(invalid("expected exactly one '/'"));
        }

        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
        if !owner.chars().all(allowed) || !name.chars().all(allowed) {
            return Err(invalid(
                "only ASCII letters, digits, '-', '_' and '.' are allowed",
            ));
        }
        if name == "." || name == ".." {
            return Err(invalid("reserved repository name"));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Owning user or organization.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without the owner.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s)?)
    }
}

/// Account that owns a repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Owner {
    pub login: String,
}

/// A repository as returned by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    #[serde(default)]
    pub private: bool,
}

/// An organization the current user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Organization {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}
