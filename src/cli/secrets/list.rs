//! List the secret names stored on a repository.

use tracing::info;

use crate::cli::output;
use crate::core::domain::RepoName;
use crate::core::store::{GitHub, SecretStore};
use crate::error::Result;

/// List remote secret names. Values are write-only and never shown.
pub async fn execute(github: GitHub, repo: &str, json: bool) -> Result<()> {
    let repo = RepoName::parse(repo)?;
    info!(repo = %repo, "listing secrets");

    let mut names = github.list_secret_names(&repo).await?;
    names.sort();

    if json {
        let output = serde_json::json!({
            "repository": repo.to_string(),
            "secrets": names,
            "count": names.len()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if names.is_empty() {
        output::dimmed("no secrets stored");
        return Ok(());
    }

    output::header(&format!("{} secrets in {}", names.len(), repo));
    for name in &names {
        output::list_item(name);
    }

    Ok(())
}
