//! Push a .env file to a repository's Actions secrets.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::domain::{DesiredSecret, Env, RepoName, SyncPlan, SyncReport};
use crate::core::store::{GitHub, SecretStore};
use crate::core::sync::Synchronizer;
use crate::error::{Error, Result};

/// Reconcile `repo` against the entries of `file`.
///
/// With `merge`, remote secrets the file does not name are retained instead
/// of deleted. The file itself is never written.
pub async fn execute(
    github: GitHub,
    repo: &str,
    file: &Path,
    dry_run: bool,
    merge: bool,
) -> Result<()> {
    let repo = RepoName::parse(repo)?;
    let env = Env::load(file)?;
    let mut desired = env.to_desired()?;
    info!(repo = %repo, file = %file.display(), entries = desired.len(), dry_run, merge, "push");

    let sync = Synchronizer::new(github);

    if merge {
        let remote = sync.store().list_secret_names(&repo).await?;
        retain_unlisted(&mut desired, remote);
    }

    if dry_run {
        let plan = sync.plan(&repo, &desired).await?;
        print_plan(&repo, &plan);
        return Ok(());
    }

    match sync.synchronize(&repo, &desired).await {
        Ok(report) => {
            print_report(&report);
            output::success(&format!("synced {}", output::name(&repo.to_string())));
            Ok(())
        }
        Err(Error::Sync(err)) => {
            print_report(err.report());
            Err(err.into())
        }
        Err(e) => Err(e),
    }
}

fn retain_unlisted(desired: &mut Vec<DesiredSecret>, remote: Vec<String>) {
    for name in remote {
        if !desired.iter().any(|d| d.name() == name) {
            desired.push(DesiredSecret::retain(name));
        }
    }
}

fn print_plan(repo: &RepoName, plan: &SyncPlan) {
    output::section(&format!("dry run for {}", repo));

    if plan.is_empty() && plan.rejected().is_empty() {
        output::dimmed("nothing to change");
        return;
    }

    for name in plan.deletions() {
        output::change('-', name);
    }
    for name in plan.upserts() {
        output::change('+', name);
    }
    for name in plan.retained() {
        output::change('=', &format!("{} (kept)", name));
    }
    for (name, reason) in plan.rejected() {
        output::change('!', &format!("{} ({})", name, reason));
    }
    if plan.skipped() > 0 {
        output::dimmed(&format!("{} entries without a name skipped", plan.skipped()));
    }
}

fn print_report(report: &SyncReport) {
    if report.is_noop() {
        output::dimmed("nothing changed");
        return;
    }

    for name in &report.deleted {
        output::change('-', name);
    }
    for name in &report.already_absent {
        output::change('-', &format!("{} (already absent)", name));
    }
    for name in &report.upserted {
        output::change('+', name);
    }
    for name in &report.retained {
        output::change('=', &format!("{} (kept)", name));
    }

    output::rule();
    output::kv("deleted", report.deleted.len() + report.already_absent.len());
    output::kv("upserted", report.upserted.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retain_unlisted_keeps_file_values() {
        let mut desired = vec![DesiredSecret::new("A", "1")];
        retain_unlisted(&mut desired, vec!["A".into(), "KEEP".into()]);

        assert_eq!(desired.len(), 2);
        assert!(desired[0].is_ready());
        assert_eq!(desired[1].name(), "KEEP");
        assert!(desired[1].is_retained());
    }
}
