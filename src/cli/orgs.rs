//! Orgs command - list the organizations the token's user belongs to.

use tracing::info;

use crate::cli::output;
use crate::core::store::GitHub;
use crate::error::Result;

/// List organizations.
pub async fn execute(github: &GitHub, json: bool) -> Result<()> {
    info!("listing organizations");

    let orgs = github.organizations().await?;

    if json {
        let output = serde_json::json!({
            "organizations": orgs.iter().map(|o| &o.login).collect::<Vec<_>>(),
            "count": orgs.len()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if orgs.is_empty() {
        output::dimmed("no organizations");
    } else {
        output::header(&format!("{} organizations", orgs.len()));
        for org in &orgs {
            output::list_item(&org.login);
        }
    }

    Ok(())
}
