//! GitHub REST API backend.
//!
//! Every request carries its headers explicitly: the bearer token held by
//! this client, the JSON media type and the pinned API version. Timeouts are
//! enforced by the underlying HTTP client; nothing is retried here.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};

use super::SecretStore;
use crate::core::config::Config;
use crate::core::constants;
use crate::core::credential::Token;
use crate::core::domain::{EncryptedSecret, Organization, PublicKey, RepoName, Repository};
use crate::core::types::SecretName;
use crate::error::{ConfigError, RemoteError, Result};

/// Client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHub {
    client: Client,
    base: Url,
    token: Token,
    per_page: u32,
}

#[derive(Deserialize)]
struct SecretList {
    total_count: usize,
    secrets: Vec<SecretEntry>,
}

#[derive(Deserialize)]
struct SecretEntry {
    name: SecretName,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

impl GitHub {
    /// Create a client from configuration and a token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the API URL does not parse, or
    /// `ConfigError::Client` if the HTTP client cannot be built.
    pub fn new(config: &Config, token: Token) -> Result<Self> {
        config.validate()?;

        let base = Url::parse(&config.api.url).map_err(|e| ConfigError::InvalidValue {
            field: "api.url",
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(constants::user_agent())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        debug!(base = %base, timeout_secs = config.api.timeout_secs, "github client ready");

        Ok(Self {
            client,
            base,
            token,
            per_page: config.api.per_page,
        })
    }

    /// Organizations the authenticated user belongs to.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if any page request fails.
    pub async fn organizations(&self) -> std::result::Result<Vec<Organization>, RemoteError> {
        self.get_all(&["user", "orgs"], &[]).await
    }

    /// Repositories owned by the authenticated user, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if any page request fails.
    pub async fn personal_repositories(
        &self,
    ) -> std::result::Result<Vec<Repository>, RemoteError> {
        self.get_all(
            &["user", "repos"],
            &[("affiliation", "owner"), ("sort", "updated")],
        )
        .await
    }

    /// Repositories of an organization.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::NotFound` if the organization does not exist or
    /// is not visible to the token.
    pub async fn organization_repositories(
        &self,
        org: &str,
    ) -> std::result::Result<Vec<Repository>, RemoteError> {
        self.get_all(&["orgs", org, "repos"], &[]).await
    }

    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, RemoteError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::Transport(format!("cannot use {} as a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(method = %method, path = %url.path(), "request");

        self.client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, self.token.bearer().as_str())
            .header(reqwest::header::ACCEPT, constants::ACCEPT)
            .header(constants::API_VERSION_HEADER, constants::API_VERSION)
    }

    async fn send(&self, request: RequestBuilder) -> std::result::Result<Response, RemoteError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        trace!(status = status.as_u16(), "response");

        if status.is_success() {
            return Ok(response);
        }

        let quota_exhausted = response
            .headers()
            .get(constants::RATE_LIMIT_REMAINING_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");
        let body = response.text().await.unwrap_or_default();

        let err = classify(status, quota_exhausted, &body);
        debug!(status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        page: u32,
    ) -> std::result::Result<T, RemoteError> {
        let per_page = self.per_page.to_string();
        let page = page.to_string();

        let request = self
            .request(Method::GET, self.endpoint(segments)?)
            .query(query)
            .query(&[("per_page", per_page.as_str()), ("page", page.as_str())]);

        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn get_all<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> std::result::Result<Vec<T>, RemoteError> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let batch: Vec<T> = self.get_page(segments, query, page).await?;
            let len = batch.len();
            items.extend(batch);

            if len < self.per_page as usize {
                break;
            }
            page = next_page(page)?;
        }

        Ok(items)
    }
}

fn next_page(page: u32) -> std::result::Result<u32, RemoteError> {
    if page >= constants::MAX_PAGES {
        return Err(RemoteError::Decode(format!(
            "pagination did not end after {} pages",
            constants::MAX_PAGES
        )));
    }
    Ok(page + 1)
}

#[async_trait]
impl SecretStore for GitHub {
    async fn list_secret_names(
        &self,
        repo: &RepoName,
    ) -> std::result::Result<Vec<SecretName>, RemoteError> {
        let segments = ["repos", repo.owner(), repo.name(), "actions", "secrets"];
        let mut names = Vec::new();
        let mut page = 1;

        loop {
            let list: SecretList = self.get_page(&segments, &[], page).await?;
            let len = list.secrets.len();
            names.extend(list.secrets.into_iter().map(|s| s.name));

            if len == 0 || names.len() >= list.total_count {
                break;
            }
            page = next_page(page)?;
        }

        debug!(repo = %repo, count = names.len(), "listed remote secrets");
        Ok(names)
    }

    async fn delete_secret(
        &self,
        repo: &RepoName,
        name: &str,
    ) -> std::result::Result<(), RemoteError> {
        let url = self.endpoint(&["repos", repo.owner(), repo.name(), "actions", "secrets", name])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn public_key(&self, repo: &RepoName) -> std::result::Result<PublicKey, RemoteError> {
        let url = self.endpoint(&[
            "repos",
            repo.owner(),
            repo.name(),
            "actions",
            "secrets",
            "public-key",
        ])?;

        let key: PublicKey = self
            .send(self.request(Method::GET, url))
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        debug!(repo = %repo, key_id = %key.key_id, "fetched public key");
        Ok(key)
    }

    async fn put_secret(
        &self,
        repo: &RepoName,
        name: &str,
        secret: &EncryptedSecret,
    ) -> std::result::Result<(), RemoteError> {
        let url = self.endpoint(&["repos", repo.owner(), repo.name(), "actions", "secrets", name])?;
        self.send(self.request(Method::PUT, url).json(secret)).await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::Transport(format!("request timeout: {}", err))
    } else if err.is_connect() {
        RemoteError::Transport(format!("connection failed: {}", err))
    } else {
        RemoteError::Transport(err.to_string())
    }
}

/// Map a non-success response to a `RemoteError`.
///
/// The message is the body's `message` field when it has one.
fn classify(status: StatusCode, quota_exhausted: bool, body: &str) -> RemoteError {
    let message = serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("an error occurred")
                .to_string()
        });

    match status {
        StatusCode::UNAUTHORIZED => RemoteError::Auth(message),
        StatusCode::FORBIDDEN if quota_exhausted => RemoteError::RateLimited(message),
        StatusCode::FORBIDDEN => RemoteError::Auth(message),
        StatusCode::NOT_FOUND => RemoteError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => RemoteError::RateLimited(message),
        StatusCode::UNPROCESSABLE_ENTITY => RemoteError::Validation(message),
        _ => RemoteError::Status {
            status: status.as_u16(),
            message,
        },
    }
}
