//! Command-line interface.

pub mod completions;
pub mod orgs;
pub mod output;
pub mod repos;
pub mod secrets;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;
use crate::error::Result;
use session::Session;

/// secretsync - Reconcile GitHub Actions repository secrets.
#[derive(Parser)]
#[command(
    name = "secretsync",
    about = "Reconcile GitHub Actions repository secrets against a .env file",
    version
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// GitHub personal access token (prompted for when omitted on a terminal)
    #[arg(long, global = true, env = constants::TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// REST API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// List your organizations
    Orgs {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List repositories you own, or those of an organization
    Repos {
        /// Organization to list instead of your own repositories
        #[arg(long)]
        org: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage a repository's Actions secrets
    Secrets {
        #[command(subcommand)]
        action: SecretsAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Secrets subcommands.
#[derive(Subcommand)]
pub enum SecretsAction {
    /// List secret names stored on a repository
    List {
        /// Repository as owner/name
        repo: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Make a repository's secrets match a .env file
    ///
    /// Remote secrets missing from the file are deleted unless `--merge` is
    /// given. Keys with an empty value keep the remote secret unchanged.
    Push {
        /// Repository as owner/name
        repo: String,
        /// Path to .env file
        file: PathBuf,
        /// Show what would change without changing anything
        #[arg(long)]
        dry_run: bool,
        /// Keep remote secrets the file does not name
        #[arg(long)]
        merge: bool,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub async fn execute(cli: Cli) -> Result<()> {
    let session = Session::new(cli.token, cli.api_url, cli.config);

    match cli.command {
        Command::Completions { shell } => completions::execute(shell),
        Command::Orgs { json } => orgs::execute(&session.client()?, json).await,
        Command::Repos { org, json } => {
            repos::execute(&session.client()?, org.as_deref(), json).await
        }
        Command::Secrets { action } => match action {
            SecretsAction::List { repo, json } => {
                secrets::list::execute(session.client()?, &repo, json).await
            }
            SecretsAction::Push {
                repo,
                file,
                dry_run,
                merge,
            } => secrets::push::execute(session.client()?, &repo, &file, dry_run, merge).await,
        },
    }
}
