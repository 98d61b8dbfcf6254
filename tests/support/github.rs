//! In-process fake of the GitHub REST endpoints secretsync calls.
//!
//! Runs an axum server on its own thread and runtime so it can serve both
//! async library tests and spawned CLI processes. Sealed values received on
//! PUT are opened with the fake's private key.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::body::Body;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::SecretKey;
use serde::Deserialize;
use serde_json::{json, Value};

pub const TOKEN: &str = "ghp_test_token";
pub const KEY_ID: &str = "568250167242549743";

/// A request as the fake saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub api_version: Option<String>,
    pub user_agent: Option<String>,
}

impl Recorded {
    /// `"METHOD /path"`, for order assertions.
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

struct Stored {
    key_id: String,
    plaintext: String,
}

struct FakeState {
    secret_key: SecretKey,
    orgs: Vec<String>,
    personal: Vec<String>,
    org_repos: HashMap<String, Vec<String>>,
    secrets: HashMap<String, BTreeMap<String, Stored>>,
    rejected_puts: HashSet<String>,
    broken_key: bool,
    ignore_paging: bool,
    requests: Vec<Recorded>,
}

impl FakeState {
    fn paging(&self, mut paging: Paging) -> Paging {
        if self.ignore_paging {
            paging.page = None;
        }
        paging
    }
}

type Shared = Arc<Mutex<FakeState>>;

fn lock(state: &Shared) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Handle to a running fake server.
pub struct FakeGitHub {
    url: String,
    state: Shared,
}

impl FakeGitHub {
    /// Start a server on an ephemeral local port.
    pub fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            secret_key: SecretKey::generate(&mut OsRng),
            orgs: Vec::new(),
            personal: Vec::new(),
            org_repos: HashMap::new(),
            secrets: HashMap::new(),
            rejected_puts: HashSet::new(),
            broken_key: false,
            ignore_paging: false,
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/user/orgs", get(list_orgs))
            .route("/user/repos", get(list_personal_repos))
            .route("/orgs/:org/repos", get(list_org_repos))
            .route("/repos/:owner/:repo/actions/secrets", get(list_secrets))
            .route(
                "/repos/:owner/:repo/actions/secrets/:name",
                get(get_public_key).put(put_secret).delete(delete_secret),
            )
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind fake server");
        listener
            .set_nonblocking(true)
            .expect("set fake listener nonblocking");
        let addr = listener.local_addr().expect("fake server address");

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("fake server runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("fake server listener");
                axum::serve(listener, app).await.expect("fake server");
            });
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    /// Base URL to pass as the API URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Add an organization the user belongs to.
    pub fn add_org(&self, login: &str, repos: &[&str]) {
        let mut state = lock(&self.state);
        state.orgs.push(login.to_string());
        state.org_repos.insert(
            login.to_string(),
            repos.iter().map(|r| format!("{}/{}", login, r)).collect(),
        );
    }

    /// Add a repository owned by the user.
    pub fn add_personal_repo(&self, full_name: &str) {
        lock(&self.state).personal.push(full_name.to_string());
    }

    /// Store a secret directly, bypassing encryption.
    pub fn seed(&self, repo: &str, name: &str, value: &str) {
        lock(&self.state).secrets.entry(repo.to_string()).or_default().insert(
            name.to_string(),
            Stored {
                key_id: KEY_ID.to_string(),
                plaintext: value.to_string(),
            },
        );
    }

    /// Secret names stored for `repo`, sorted.
    pub fn names(&self, repo: &str) -> Vec<String> {
        lock(&self.state)
            .secrets
            .get(repo)
            .map(|s| s.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The decrypted value received for a secret.
    pub fn value(&self, repo: &str, name: &str) -> Option<String> {
        lock(&self.state)
            .secrets
            .get(repo)
            .and_then(|s| s.get(name))
            .map(|s| s.plaintext.clone())
    }

    /// Key id the secret was last written with.
    pub fn key_id(&self, repo: &str, name: &str) -> Option<String> {
        lock(&self.state)
            .secrets
            .get(repo)
            .and_then(|s| s.get(name))
            .map(|s| s.key_id.clone())
    }

    /// Answer 422 to any PUT of `name`.
    pub fn reject_put(&self, name: &str) {
        lock(&self.state).rejected_puts.insert(name.to_string());
    }

    /// Answer 500 to public key requests.
    pub fn break_public_key(&self) {
        lock(&self.state).broken_key = true;
    }

    /// Serve the first page of every org and repo listing, whatever page
    /// was asked for.
    pub fn ignore_paging(&self) {
        lock(&self.state).ignore_paging = true;
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        lock(&self.state).requests.clone()
    }

    /// Requests received so far as `"METHOD /path"` lines.
    pub fn request_lines(&self) -> Vec<String> {
        self.requests().iter().map(Recorded::line).collect()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn record(State(state): State<Shared>, request: Request<Body>, next: Next) -> Response {
    let headers = request.headers();
    let recorded = Recorded {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().unwrap_or_default().to_string(),
        authorization: header(headers, "authorization"),
        accept: header(headers, "accept"),
        api_version: header(headers, "x-github-api-version"),
        user_agent: header(headers, "user-agent"),
    };

    let expected = format!("Bearer {}", TOKEN);
    let authorized = recorded.authorization.as_deref() == Some(expected.as_str());
    lock(&state).requests.push(recorded);

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Bad credentials" })),
        )
            .into_response();
    }

    next.run(request).await
}

#[derive(Deserialize)]
struct Paging {
    per_page: Option<usize>,
    page: Option<usize>,
}

impl Paging {
    fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let per_page = self.per_page.unwrap_or(30).max(1);
        let page = self.page.unwrap_or(1).max(1);
        items
            .iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect()
    }
}

fn repo_json(full_name: &str, private: bool) -> Value {
    let (owner, name) = full_name.split_once('/').unwrap_or((full_name, full_name));
    json!({
        "name": name,
        "full_name": full_name,
        "owner": { "login": owner },
        "private": private
    })
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not Found" })),
    )
        .into_response()
}

async fn list_orgs(State(state): State<Shared>, Query(paging): Query<Paging>) -> Response {
    let state = lock(&state);
    let orgs: Vec<Value> = state
        .orgs
        .iter()
        .map(|login| json!({ "login": login, "avatar_url": "" }))
        .collect();
    Json(state.paging(paging).slice(&orgs)).into_response()
}

async fn list_personal_repos(State(state): State<Shared>, Query(paging): Query<Paging>) -> Response {
    let state = lock(&state);
    let repos: Vec<Value> = state
        .personal
        .iter()
        .map(|r| repo_json(r, true))
        .collect();
    Json(state.paging(paging).slice(&repos)).into_response()
}

async fn list_org_repos(
    State(state): State<Shared>,
    Path(org): Path<String>,
    Query(paging): Query<Paging>,
) -> Response {
    let state = lock(&state);
    let Some(repos) = state.org_repos.get(&org) else {
        return not_found();
    };
    let repos: Vec<Value> = repos.iter().map(|r| repo_json(r, false)).collect();
    Json(state.paging(paging).slice(&repos)).into_response()
}

async fn list_secrets(
    State(state): State<Shared>,
    Path((owner, repo)): Path<(String, String)>,
    Query(paging): Query<Paging>,
) -> Response {
    let state = lock(&state);
    let names: Vec<Value> = state
        .secrets
        .get(&format!("{}/{}", owner, repo))
        .map(|s| {
            s.keys()
                .map(|name| json!({ "name": name, "created_at": "", "updated_at": "" }))
                .collect()
        })
        .unwrap_or_default();

    Json(json!({
        "total_count": names.len(),
        "secrets": paging.slice(&names)
    }))
    .into_response()
}

async fn get_public_key(
    State(state): State<Shared>,
    Path((_owner, _repo, name)): Path<(String, String, String)>,
) -> Response {
    if name != "public-key" {
        return not_found();
    }

    let state = lock(&state);
    if state.broken_key {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Server Error" })),
        )
            .into_response();
    }

    Json(json!({
        "key_id": KEY_ID,
        "key": BASE64.encode(state.secret_key.public_key().as_bytes())
    }))
    .into_response()
}

#[derive(Deserialize)]
struct PutBody {
    encrypted_value: String,
    key_id: String,
}

async fn put_secret(
    State(state): State<Shared>,
    Path((owner, repo, name)): Path<(String, String, String)>,
    Json(body): Json<PutBody>,
) -> Response {
    let mut state = lock(&state);

    let unprocessable = |message: &str| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": message })),
        )
            .into_response()
    };

    if state.rejected_puts.contains(&name) {
        return unprocessable("Secret rejected");
    }
    if body.key_id != KEY_ID {
        return unprocessable("Bad key_id");
    }

    let Ok(sealed) = BASE64.decode(&body.encrypted_value) else {
        return unprocessable("encrypted_value is not base64");
    };
    let Ok(opened) = state.secret_key.unseal(&sealed) else {
        return unprocessable("encrypted_value could not be opened");
    };
    let Ok(plaintext) = String::from_utf8(opened) else {
        return unprocessable("encrypted_value is not utf-8");
    };

    let secrets = state
        .secrets
        .entry(format!("{}/{}", owner, repo))
        .or_default();
    let created = secrets
        .insert(
            name.to_uppercase(),
            Stored {
                key_id: body.key_id,
                plaintext,
            },
        )
        .is_none();

    if created {
        StatusCode::CREATED.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn delete_secret(
    State(state): State<Shared>,
    Path((owner, repo, name)): Path<(String, String, String)>,
) -> Response {
    let mut state = lock(&state);
    let removed = state
        .secrets
        .get_mut(&format!("{}/{}", owner, repo))
        .and_then(|s| s.remove(&name));

    match removed {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}
