//! secretsync - Reconcile GitHub Actions repository secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── orgs          # List organizations
//! │   ├── repos         # List repositories
//! │   ├── secrets       # List and push repository secrets
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # config.toml management
//!     ├── credential    # API token
//!     ├── cipher/       # Sealed-box encryption
//!     ├── domain/       # Desired secrets, plans, reports, .env files
//!     ├── store/        # Remote secret store backends
//!     │   ├── github    # REST API client
//!     │   └── memory    # In-process store
//!     ├── sync          # Reconciliation protocol
//!     └── validation    # Name and input checks
//! ```
//!
//! # Example
//!
//! ```no_run
//! use secretsync::core::config::Config;
//! use secretsync::core::credential::Token;
//! use secretsync::core::domain::{DesiredSecret, RepoName};
//! use secretsync::core::store::GitHub;
//! use secretsync::core::sync::Synchronizer;
//!
//! # async fn run() -> secretsync::error::Result<()> {
//! let github = GitHub::new(&Config::default(), Token::new("ghp_example")?)?;
//! let repo = RepoName::parse("octocat/hello-world")?;
//!
//! let report = Synchronizer::new(github)
//!     .synchronize(&repo, &[DesiredSecret::new("API_KEY", "s3cr3t")])
//!     .await?;
//! println!("upserted {}", report.upserted.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
