//! Sync plan.
//!
//! The comparison between remote secret names and a desired secret list.

use std::collections::BTreeSet;

use crate::core::domain::DesiredSecret;
use crate::core::types::SecretName;
use crate::core::validation;
use crate::error::ValidationError;

/// What a run will do, computed before any mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    deletions: Vec<SecretName>,
    upserts: Vec<SecretName>,
    retained: Vec<SecretName>,
    rejected: Vec<(SecretName, ValidationError)>,
    skipped: usize,
}

impl SyncPlan {
    /// Compute the plan.
    ///
    /// # Arguments
    ///
    /// * `remote` - Secret names currently stored remotely
    /// * `desired` - Entries the caller wants present
    ///
    /// # Returns
    ///
    /// A plan whose deletions are the remote names not named by any desired
    /// entry, sorted by name. Upserts keep the caller's order. Entries with a
    /// name but no value are retained: they protect a remote secret from
    /// deletion without being written. Named entries that break the naming
    /// rules are rejected and neither written nor retained.
    pub fn compute(remote: &[SecretName], desired: &[DesiredSecret]) -> Self {
        let named: BTreeSet<&str> = desired
            .iter()
            .map(|d| d.name())
            .filter(|n| !n.is_empty())
            .collect();

        let remote: BTreeSet<&str> = remote.iter().map(String::as_str).collect();

        let deletions = remote
            .difference(&named)
            .map(|n| n.to_string())
            .collect();

        let mut upserts = Vec::new();
        let mut retained = Vec::new();
        let mut rejected = Vec::new();
        let mut skipped = 0;

        for secret in desired {
            if secret.name().is_empty() {
                skipped += 1;
            } else if let Err(e) = validation::validate_name(secret.name()) {
                rejected.push((secret.name().to_string(), e));
            } else if secret.is_ready() {
                upserts.push(secret.name().to_string());
            } else {
                retained.push(secret.name().to_string());
            }
        }

        Self {
            deletions,
            upserts,
            retained,
            rejected,
            skipped,
        }
    }

    /// Remote names to delete.
    pub fn deletions(&self) -> &[SecretName] {
        &self.deletions
    }

    /// Names to encrypt and write.
    pub fn upserts(&self) -> &[SecretName] {
        &self.upserts
    }

    /// Names kept without rewriting.
    pub fn retained(&self) -> &[SecretName] {
        &self.retained
    }

    /// Named entries refused for breaking the naming rules, with the reason.
    pub fn rejected(&self) -> &[(SecretName, ValidationError)] {
        &self.rejected
    }

    /// Whether `name` was refused by the naming rules.
    pub fn is_rejected(&self, name: &str) -> bool {
        self.rejected.iter().any(|(n, _)| n == name)
    }

    /// Entries ignored for having no name.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Whether nothing would be deleted or written.
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.upserts.is_empty()
    }
}
