//! Env type.
//!
//! A parsed .env file, the bulk-import source for a sync run.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::domain::DesiredSecret;
use crate::core::validation;
use crate::error::{Result, ValidationError};

/// A parsed .env file
#[derive(Clone)]
pub struct Env {
    entries: Vec<(String, String)>,
    path: PathBuf,
}

impl Env {
    /// Parse an .env file from disk
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or a line is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading env file");

        let contents = std::fs::read_to_string(path)?;
        let entries = parse(&contents)?;

        debug!(entries = entries.len(), "env file loaded");

        Ok(Self {
            entries,
            path: path.to_path_buf(),
        })
    }

    /// Parse .env content that did not come from a file.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEnvLine` for a non-comment line
    /// without `=` or with an empty key.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(Self {
            entries: parse(contents)?,
            path: PathBuf::from("-"),
        })
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All entries as key-value pairs
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Convert to the desired secret list for a sync run.
    ///
    /// A key with an empty value becomes a retained entry: the remote secret
    /// of that name is kept as is. Keys are upper-cased; keys that are still
    /// not valid secret names are passed through and fail on their own
    /// during the sync.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::DuplicateName` if two keys name the same
    /// secret once upper-cased.
    pub fn to_desired(&self) -> Result<Vec<DesiredSecret>> {
        let desired: Vec<DesiredSecret> = self
            .entries
            .iter()
            .map(|(key, value)| DesiredSecret::new(key, value.as_str()))
            .collect();

        validation::validate_desired(&desired)?;
        Ok(desired)
    }
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.entries.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Env")
            .field("path", &self.path)
            .field("keys", &keys)
            .finish()
    }
}

fn parse(contents: &str) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((key, value)) = line.split_once('=') else {
            return Err(ValidationError::InvalidEnvLine {
                line: index + 1,
                reason: "expected KEY=value".to_string(),
            }
            .into());
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(ValidationError::InvalidEnvLine {
                line: index + 1,
                reason: "empty key".to_string(),
            }
            .into());
        }

        entries.push((key.to_string(), parse_env_value(value.trim())));
    }

    Ok(entries)
}

fn parse_env_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    raw.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
