//! Secret synchronization.
//!
//! Reconciles a repository's remote secrets against a desired list:
//!
//! 1. list remote names (abort on failure, nothing mutated)
//! 2. delete remote names no desired entry names (per item, best effort)
//! 3. fetch the public key (abort on failure, deletions stay applied)
//! 4. seal and upsert every ready entry (per item, best effort)
//!
//! Entries whose names break the naming rules are reported as per-item
//! failures and never sent; the rest of the run goes ahead.
//!
//! Calls are issued one at a time in that order, so every deletion has
//! settled before the key is fetched. Nothing is retried and nothing is
//! rolled back. Dropping the returned future abandons the in-flight request;
//! operations that already completed stay applied.

use tracing::{debug, info, warn};

use crate::core::cipher::{Cipher, SealedBox};
use crate::core::domain::{
    DesiredSecret, EncryptedSecret, FailureCause, RepoName, SyncFailure, SyncPhase, SyncPlan,
    SyncReport,
};
use crate::core::store::SecretStore;
use crate::core::validation;
use crate::error::{Error, RemoteError, Result, SyncError};

/// Runs the reconciliation protocol against a [`SecretStore`].
pub struct Synchronizer<S, C = SealedBox> {
    store: S,
    cipher: C,
}

impl<S: SecretStore> Synchronizer<S> {
    /// Create a synchronizer using sealed-box encryption.
    pub fn new(store: S) -> Self {
        Self::with_cipher(store, SealedBox)
    }
}

impl<S: SecretStore, C: Cipher> Synchronizer<S, C> {
    /// Create a synchronizer with a specific cipher.
    pub fn with_cipher(store: S, cipher: C) -> Self {
        Self { store, cipher }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Compute what [`synchronize`](Self::synchronize) would do, without
    /// mutating anything.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for duplicate names, or `RemoteError` if
    /// the remote names cannot be listed. Invalid names show up in
    /// [`SyncPlan::rejected`].
    pub async fn plan(&self, repo: &RepoName, desired: &[DesiredSecret]) -> Result<SyncPlan> {
        validation::validate_desired(desired)?;

        let remote = self.store.list_secret_names(repo).await?;
        let plan = SyncPlan::compute(&remote, desired);

        debug!(
            repo = %repo,
            deletions = plan.deletions().len(),
            upserts = plan.upserts().len(),
            retained = plan.retained().len(),
            rejected = plan.rejected().len(),
            "planned sync"
        );

        Ok(plan)
    }

    /// Make the repository's remote secrets match `desired`.
    ///
    /// On success the remote name set equals the ready names plus any
    /// retained names that already existed remotely.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for duplicate names, before any call
    /// - `SyncError::Aborted` if listing or the key fetch fails, or if the
    ///   credential is rejected at any point
    /// - `SyncError::Partial` if any name was invalid or any deletion or
    ///   upsert failed; the other items were still attempted
    pub async fn synchronize(
        &self,
        repo: &RepoName,
        desired: &[DesiredSecret],
    ) -> Result<SyncReport> {
        validation::validate_desired(desired)?;
        info!(
            repo = %repo,
            desired = desired.len(),
            cipher = self.cipher.name(),
            "starting sync"
        );

        let mut report = SyncReport::default();
        let mut failures = Vec::new();

        enter(SyncPhase::FetchingRemote);
        let remote = match self.store.list_secret_names(repo).await {
            Ok(names) => names,
            Err(e) => return Err(aborted(SyncPhase::FetchingRemote, e, report, failures)),
        };

        let plan = SyncPlan::compute(&remote, desired);
        report.retained = plan.retained().to_vec();
        report.skipped = plan.skipped();
        for (name, e) in plan.rejected() {
            warn!(name = %name, error = %e, "invalid secret name");
            failures.push(SyncFailure::new(
                name.clone(),
                SyncPhase::Upserting,
                FailureCause::Invalid(e.clone()),
            ));
        }

        enter(SyncPhase::Deleting);
        for name in plan.deletions() {
            match self.store.delete_secret(repo, name).await {
                Ok(()) => {
                    debug!(name = %name, "deleted");
                    report.deleted.push(name.clone());
                }
                Err(e) if e.is_not_found() => {
                    debug!(name = %name, "already absent");
                    report.already_absent.push(name.clone());
                }
                Err(e) if e.is_auth() => {
                    return Err(aborted(SyncPhase::Deleting, e, report, failures));
                }
                Err(e) => {
                    warn!(name = %name, error = %e, "delete failed");
                    failures.push(SyncFailure::new(
                        name.clone(),
                        SyncPhase::Deleting,
                        FailureCause::Remote(e),
                    ));
                }
            }
        }

        enter(SyncPhase::FetchingKey);
        let key = match self.store.public_key(repo).await {
            Ok(key) => key,
            Err(e) => return Err(aborted(SyncPhase::FetchingKey, e, report, failures)),
        };

        enter(SyncPhase::Upserting);
        for secret in desired
            .iter()
            .filter(|d| d.is_ready() && !plan.is_rejected(d.name()))
        {
            let encrypted_value = match self.cipher.seal(secret.value(), &key.key) {
                Ok(sealed) => sealed,
                Err(e) => {
                    warn!(name = %secret.name(), error = %e, "encryption failed");
                    failures.push(SyncFailure::new(
                        secret.name(),
                        SyncPhase::Upserting,
                        FailureCause::Cipher(e),
                    ));
                    continue;
                }
            };

            let payload = EncryptedSecret {
                encrypted_value,
                key_id: key.key_id.clone(),
            };

            match self.store.put_secret(repo, secret.name(), &payload).await {
                Ok(()) => {
                    debug!(name = %secret.name(), "upserted");
                    report.upserted.push(secret.name().to_string());
                }
                Err(e) if e.is_auth() => {
                    return Err(aborted(SyncPhase::Upserting, e, report, failures));
                }
                Err(e) => {
                    warn!(name = %secret.name(), error = %e, "upsert failed");
                    failures.push(SyncFailure::new(
                        secret.name(),
                        SyncPhase::Upserting,
                        FailureCause::Remote(e),
                    ));
                }
            }
        }

        if failures.is_empty() {
            info!(
                repo = %repo,
                deleted = report.deleted.len(),
                upserted = report.upserted.len(),
                "sync succeeded"
            );
            Ok(report)
        } else {
            warn!(repo = %repo, failed = failures.len(), "sync partially failed");
            Err(SyncError::Partial { failures, report }.into())
        }
    }
}

fn enter(phase: SyncPhase) {
    debug!(phase = %phase, "sync phase");
}

fn aborted(
    phase: SyncPhase,
    source: RemoteError,
    completed: SyncReport,
    failures: Vec<SyncFailure>,
) -> Error {
    warn!(phase = %phase, error = %source, "sync aborted");
    SyncError::Aborted {
        phase,
        source,
        completed,
        failures,
    }
    .into()
}
