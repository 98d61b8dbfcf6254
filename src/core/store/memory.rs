//! In-memory secret store.
//!
//! Behaves like the remote API: values are write-only, deleting a missing
//! secret is not-found, and upserts sealed under a stale key id are
//! rejected. Holds a real key pair so stored values can be opened to check
//! they were sealed correctly. Failures can be injected per operation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::SecretKey;

use super::SecretStore;
use crate::core::domain::{EncryptedSecret, PublicKey, RepoName};
use crate::core::types::SecretName;
use crate::error::RemoteError;

/// A call observed by a [`MemoryStore`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Delete(SecretName),
    PublicKey,
    Put(SecretName),
}

#[derive(Default)]
struct Failures {
    list: Option<RemoteError>,
    public_key: Option<RemoteError>,
    delete: HashMap<SecretName, RemoteError>,
    put: HashMap<SecretName, RemoteError>,
}

struct State {
    secret_key: SecretKey,
    key_version: u32,
    repos: HashMap<String, BTreeMap<SecretName, EncryptedSecret>>,
    calls: Vec<StoreCall>,
    failures: Failures,
}

impl State {
    fn key_id(&self) -> String {
        format!("mem-key-{}", self.key_version)
    }
}

/// In-process [`SecretStore`].
pub struct MemoryStore {
    state: Mutex<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store with a fresh key pair.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                secret_key: SecretKey::generate(&mut OsRng),
                key_version: 1,
                repos: HashMap::new(),
                calls: Vec::new(),
                failures: Failures::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Pre-populate secret names for a repository.
    pub fn seed(&self, repo: &RepoName, names: &[&str]) {
        let mut state = self.lock();
        let key_id = state.key_id();
        let secrets = state.repos.entry(repo.to_string()).or_default();
        for name in names {
            secrets.insert(
                name.to_string(),
                EncryptedSecret {
                    encrypted_value: String::new(),
                    key_id: key_id.clone(),
                },
            );
        }
    }

    /// Secret names currently stored, sorted.
    pub fn names(&self, repo: &RepoName) -> Vec<SecretName> {
        self.lock()
            .repos
            .get(&repo.to_string())
            .map(|s| s.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Decrypt a stored value with the store's private key.
    ///
    /// Returns `None` if the secret is absent or was not sealed under the
    /// current key.
    pub fn open(&self, repo: &RepoName, name: &str) -> Option<String> {
        let state = self.lock();
        let stored = state.repos.get(&repo.to_string())?.get(name)?;
        let sealed = BASE64.decode(&stored.encrypted_value).ok()?;
        let plain = state.secret_key.unseal(&sealed).ok()?;
        String::from_utf8(plain).ok()
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Replace the key pair. Values sealed under the old key id are rejected
    /// from now on.
    pub fn rotate_key(&self) {
        let mut state = self.lock();
        state.secret_key = SecretKey::generate(&mut OsRng);
        state.key_version += 1;
    }

    /// Make every listing call fail.
    pub fn fail_list(&self, err: RemoteError) {
        self.lock().failures.list = Some(err);
    }

    /// Make every public-key fetch fail.
    pub fn fail_public_key(&self, err: RemoteError) {
        self.lock().failures.public_key = Some(err);
    }

    /// Make deleting `name` fail.
    pub fn fail_delete(&self, name: &str, err: RemoteError) {
        self.lock().failures.delete.insert(name.to_string(), err);
    }

    /// Make upserting `name` fail.
    pub fn fail_put(&self, name: &str, err: RemoteError) {
        self.lock().failures.put.insert(name.to_string(), err);
    }

    /// Remove all injected failures.
    pub fn clear_failures(&self) {
        self.lock().failures = Failures::default();
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn list_secret_names(&self, repo: &RepoName) -> Result<Vec<SecretName>, RemoteError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::List);

        if let Some(err) = &state.failures.list {
            return Err(err.clone());
        }

        Ok(state
            .repos
            .get(&repo.to_string())
            .map(|s| s.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_secret(&self, repo: &RepoName, name: &str) -> Result<(), RemoteError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Delete(name.to_string()));

        if let Some(err) = state.failures.delete.get(name) {
            return Err(err.clone());
        }

        state
            .repos
            .get_mut(&repo.to_string())
            .and_then(|s| s.remove(name))
            .map(|_| ())
            .ok_or_else(|| RemoteError::NotFound(format!("secret {}", name)))
    }

    async fn public_key(&self, _repo: &RepoName) -> Result<PublicKey, RemoteError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::PublicKey);

        if let Some(err) = &state.failures.public_key {
            return Err(err.clone());
        }

        Ok(PublicKey {
            key_id: state.key_id(),
            key: BASE64.encode(state.secret_key.public_key().as_bytes()),
        })
    }

    async fn put_secret(
        &self,
        repo: &RepoName,
        name: &str,
        secret: &EncryptedSecret,
    ) -> Result<(), RemoteError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Put(name.to_string()));

        if let Some(err) = state.failures.put.get(name) {
            return Err(err.clone());
        }

        if secret.key_id != state.key_id() {
            return Err(RemoteError::Validation(format!(
                "key_id {} does not match current key",
                secret.key_id
            )));
        }
        if BASE64.decode(&secret.encrypted_value).is_err() {
            return Err(RemoteError::Validation(
                "encrypted_value is not base64".to_string(),
            ));
        }

        state
            .repos
            .entry(repo.to_string())
            .or_default()
            .insert(name.to_string(), secret.clone());
        Ok(())
    }
}
