//! Error types.
//!
//! Each layer has its own error enum; [`Error`] wraps them so callers can
//! propagate with `?` and still match on the precise cause.

use thiserror::Error;

use crate::core::domain::{SyncFailure, SyncPhase, SyncReport};

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading and credential resolution errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("no GitHub token provided")]
    MissingToken,

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Input validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid secret name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("duplicate secret name: {0}")]
    DuplicateName(String),

    #[error("invalid repository '{repo}': {reason}")]
    InvalidRepo { repo: String, reason: String },

    #[error("invalid .env line {line}: {reason}")]
    InvalidEnvLine { line: usize, reason: String },
}

/// Sealed-box encryption errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("invalid base64 in public key")]
    InvalidBase64,

    #[error("invalid public key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("encryption failed")]
    EncryptionFailed,
}

/// Errors returned by the remote secret store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("rejected by remote: {0}")]
    Validation(String),

    #[error("unexpected response ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Whether this error means the credential itself is unusable.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Whether the remote reported the target as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Failures of a synchronization run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A phase-fatal step failed; later phases never ran.
    #[error("sync aborted while {phase}: {source}")]
    Aborted {
        phase: SyncPhase,
        #[source]
        source: RemoteError,
        /// Work completed before the abort. Not rolled back.
        completed: SyncReport,
        /// Per-secret failures collected before the abort.
        failures: Vec<SyncFailure>,
    },

    /// Every step ran, but some per-secret operations failed.
    #[error("sync partially failed: {}", summarize(.failures))]
    Partial {
        failures: Vec<SyncFailure>,
        report: SyncReport,
    },
}

impl SyncError {
    /// Names of the secrets whose operations failed, for a narrower retry.
    pub fn failed_names(&self) -> Vec<&str> {
        self.failures().iter().map(|f| f.name()).collect()
    }

    /// Per-secret failures.
    pub fn failures(&self) -> &[SyncFailure] {
        match self {
            Self::Aborted { failures, .. } | Self::Partial { failures, .. } => failures,
        }
    }

    /// The report of work that did complete.
    pub fn report(&self) -> &SyncReport {
        match self {
            Self::Aborted { completed, .. } => completed,
            Self::Partial { report, .. } => report,
        }
    }
}

fn summarize(failures: &[SyncFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
