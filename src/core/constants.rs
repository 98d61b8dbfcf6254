//! Constants used throughout secretsync.
//!
//! Centralizes magic strings and configuration values.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type requested on every API call.
pub const ACCEPT: &str = "application/vnd.github+json";

/// REST API version header name.
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// REST API version pinned by this client.
pub const API_VERSION: &str = "2022-11-28";

/// Header reporting the remaining request quota.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Largest page size the listing endpoints accept.
pub const MAX_PER_PAGE: u32 = 100;

/// Pages fetched for one listing before giving up on a server that never
/// ends pagination.
pub const MAX_PAGES: u32 = 100;

/// Prefix the remote reserves for its own secrets.
pub const RESERVED_NAME_PREFIX: &str = "GITHUB_";

/// Config directory name under the platform config dir.
pub const CONFIG_DIR: &str = "secretsync";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "SECRETSYNC_CONFIG";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SECRETSYNC_LOG";

/// User-Agent sent with every request.
pub fn user_agent() -> String {
    format!("secretsync/{}", env!("CARGO_PKG_VERSION"))
}
