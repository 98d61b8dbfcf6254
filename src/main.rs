//! secretsync - Reconcile GitHub Actions repository secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secretsync::cli::output;
use secretsync::cli::{execute, Cli};
use secretsync::core::constants::LOG_ENV;
use secretsync::error::{ConfigError, Error, RemoteError, SyncError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secretsync=debug")
        } else {
            EnvFilter::new("secretsync=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            output::error(&format!("failed to start runtime: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(execute(cli)) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(err: &Error) -> Option<&'static str> {
    let remote = match err {
        Error::Config(ConfigError::MissingToken) => {
            return Some("pass --token or set GITHUB_TOKEN");
        }
        Error::Sync(SyncError::Partial { .. }) => {
            return Some("fix the failed secrets and push again; the .env file was not modified");
        }
        Error::Sync(SyncError::Aborted { source, .. }) => source,
        Error::Remote(remote) => remote,
        _ => return None,
    };

    match remote {
        RemoteError::Auth(_) => Some("check the token and that it grants the repo scope"),
        RemoteError::NotFound(_) => Some("check the repository name and that the token can see it"),
        RemoteError::RateLimited(_) => Some("wait for the rate limit window to reset"),
        _ => None,
    }
}
