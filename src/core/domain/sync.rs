//! Outcome types of a synchronization run.

use std::fmt;

use crate::core::types::SecretName;
use crate::error::{CipherError, RemoteError, ValidationError};

/// Phase of a run.
///
/// A run moves `FetchingRemote -> Deleting -> FetchingKey -> Upserting` and
/// never goes back. Nothing is rolled back on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    FetchingRemote,
    Deleting,
    FetchingKey,
    Upserting,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FetchingRemote => "listing remote secrets",
            Self::Deleting => "deleting",
            Self::FetchingKey => "fetching public key",
            Self::Upserting => "upserting",
        };
        f.write_str(label)
    }
}

/// Why a single secret operation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    Remote(RemoteError),
    Cipher(CipherError),
    /// The name breaks the remote naming rules; nothing was sent for it.
    Invalid(ValidationError),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(e) => write!(f, "{}", e),
            Self::Cipher(e) => write!(f, "{}", e),
            Self::Invalid(e) => write!(f, "{}", e),
        }
    }
}

/// A failed per-secret operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    name: SecretName,
    phase: SyncPhase,
    cause: FailureCause,
}

impl SyncFailure {
    /// Create a new failure record.
    pub fn new(name: impl Into<SecretName>, phase: SyncPhase, cause: FailureCause) -> Self {
        Self {
            name: name.into(),
            phase,
            cause,
        }
    }

    /// Secret name the operation targeted.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phase the failure happened in.
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Underlying cause.
    pub fn cause(&self) -> &FailureCause {
        &self.cause
    }
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.phase, self.cause)
    }
}

/// What a run changed remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Secrets deleted by this run.
    pub deleted: Vec<SecretName>,
    /// Secrets scheduled for deletion that were already gone.
    pub already_absent: Vec<SecretName>,
    /// Secrets created or updated.
    pub upserted: Vec<SecretName>,
    /// Named entries left untouched because they carried no value.
    pub retained: Vec<SecretName>,
    /// Entries dropped because their name was empty.
    pub skipped: usize,
}

impl SyncReport {
    /// Whether the run changed anything remotely.
    pub fn is_noop(&self) -> bool {
        self.deleted.is_empty() && self.upserted.is_empty()
    }
}
