//! Remote secret store.
//!
//! A transactionless key-value store of write-only secrets, scoped per
//! repository and addressed by name, with a rotating public key for write
//! encryption.
//!
//! ## Backends
//!
//! - [`GitHub`]: the Actions secrets REST API.
//! - [`MemoryStore`]: in-process store holding a real key pair, for tests
//!   and embedding.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use async_trait::async_trait;

use crate::core::domain::{EncryptedSecret, PublicKey, RepoName};
use crate::core::types::SecretName;
use crate::error::RemoteError;

mod github;
mod memory;

pub use github::GitHub;
pub use memory::{MemoryStore, StoreCall};

/// Remote secret store trait.
///
/// Every call is independent; the store offers no transactions. Values are
/// write-only and never returned.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List the names of all secrets stored for a repository.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Auth`, `RemoteError::NotFound` if the repository
    /// is missing or inaccessible, or `RemoteError::RateLimited`.
    async fn list_secret_names(&self, repo: &RepoName) -> Result<Vec<SecretName>, RemoteError>;

    /// Delete a secret by name.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::NotFound` if no such secret exists.
    async fn delete_secret(&self, repo: &RepoName, name: &str) -> Result<(), RemoteError>;

    /// Fetch the repository's current public key.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Auth` or `RemoteError::NotFound`.
    async fn public_key(&self, repo: &RepoName) -> Result<PublicKey, RemoteError>;

    /// Create or update a secret.
    ///
    /// Creation and update are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Validation` if the payload is rejected, for
    /// example because `key_id` is stale.
    async fn put_secret(
        &self,
        repo: &RepoName,
        name: &str,
        secret: &EncryptedSecret,
    ) -> Result<(), RemoteError>;
}

#[async_trait]
impl<T: SecretStore + ?Sized> SecretStore for &T {
    async fn list_secret_names(&self, repo: &RepoName) -> Result<Vec<SecretName>, RemoteError> {
        (**self).list_secret_names(repo).await
    }

    async fn delete_secret(&self, repo: &RepoName, name: &str) -> Result<(), RemoteError> {
        (**self).delete_secret(repo, name).await
    }

    async fn public_key(&self, repo: &RepoName) -> Result<PublicKey, RemoteError> {
        (**self).public_key(repo).await
    }

    async fn put_secret(
        &self,
        repo: &RepoName,
        name: &str,
        secret: &EncryptedSecret,
    ) -> Result<(), RemoteError> {
        (**self).put_secret(repo, name, secret).await
    }
}
