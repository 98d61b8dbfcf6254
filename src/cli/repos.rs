//! Repos command - list personal or organization repositories.

use tracing::info;

use crate::cli::output;
use crate::core::store::GitHub;
use crate::error::Result;

/// List repositories owned by the user, or by `org` when given.
pub async fn execute(github: &GitHub, org: Option<&str>, json: bool) -> Result<()> {
    info!(org = org.unwrap_or("<personal>"), "listing repositories");

    let repos = match org {
        Some(org) => github.organization_repositories(org).await?,
        None => github.personal_repositories().await?,
    };

    if json {
        let output = serde_json::json!({
            "repositories": repos.iter().map(|r| &r.full_name).collect::<Vec<_>>(),
            "count": repos.len()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if repos.is_empty() {
        output::dimmed("no repositories");
    } else {
        output::header(&format!("{} repositories", repos.len()));
        for repo in &repos {
            if repo.private {
                output::list_item(&format!("{} (private)", repo.full_name));
            } else {
                output::list_item(&repo.full_name);
            }
        }
    }

    Ok(())
}
