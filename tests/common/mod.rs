use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One repository served by the mock upstream.
#[derive(Clone)]
pub struct RepoFixture {
    pub id: u64,
    pub fork: bool,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub size: u64,
    pub languages: Vec<(&'static str, u64)>,
}

impl RepoFixture {
    pub fn new(id: u64) -> Self {
        RepoFixture {
            id,
            fork: false,
            stargazers_count: 0,
            forks_count: 0,
            size: 0,
            languages: Vec::new(),
        }
    }
}

/// Behavior of the mock GitHub API.
#[derive(Default)]
pub struct MockGitHubConfig {
    /// Pages served by the repository listing endpoint, in order. Any page
    /// past the end comes back as an empty array.
    pub pages: Vec<Vec<RepoFixture>>,
    /// Fail the listing endpoint with this status when the given page is
    /// requested.
    pub fail_page: Option<(u32, u16)>,
    /// Fail every languages endpoint request with this status.
    pub fail_languages: Option<u16>,
}

/// Handle to a running mock upstream.
pub struct MockGitHub {
    pub base_url: String,
    pub list_requests: Arc<AtomicUsize>,
    pub language_requests: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct MockState {
    base_url: String,
    pages: Arc<Vec<Vec<RepoFixture>>>,
    fail_page: Option<(u32, u16)>,
    fail_languages: Option<u16>,
    list_requests: Arc<AtomicUsize>,
    language_requests: Arc<AtomicUsize>,
}

/// Serve a fake GitHub API on an ephemeral local port.
pub async fn spawn_mock_github(config: MockGitHubConfig) -> MockGitHub {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream listener");
    let addr = listener.local_addr().expect("Failed to get mock upstream address");
    let base_url = format!("http://{}", addr);

    let list_requests = Arc::new(AtomicUsize::new(0));
    let language_requests = Arc::new(AtomicUsize::new(0));

    let state = MockState {
        base_url: base_url.clone(),
        pages: Arc::new(config.pages),
        fail_page: config.fail_page,
        fail_languages: config.fail_languages,
        list_requests: list_requests.clone(),
        language_requests: language_requests.clone(),
    };

    let app = Router::new()
        .route("/users/:username/repos", get(list_repositories))
        .route("/langs/:id", get(repository_languages))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock upstream failed");
    });

    MockGitHub {
        base_url,
        list_requests,
        language_requests,
    }
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

async fn list_repositories(
    State(state): State<MockState>,
    Path(_username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    state.list_requests.fetch_add(1, Ordering::SeqCst);
    let page = query.page.unwrap_or(1);

    if let Some((fail_page, status)) = state.fail_page {
        if page == fail_page {
            return mock_failure(status);
        }
    }

    let repos: Vec<Value> = state
        .pages
        .get(page.saturating_sub(1) as usize)
        .map(|fixtures| {
            fixtures
                .iter()
                .map(|fixture| repository_json(fixture, &state.base_url))
                .collect()
        })
        .unwrap_or_default();

    Json(repos).into_response()
}

async fn repository_languages(State(state): State<MockState>, Path(id): Path<u64>) -> Response {
    state.language_requests.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = state.fail_languages {
        return mock_failure(status);
    }

    let languages: BTreeMap<String, u64> = state
        .pages
        .iter()
        .flatten()
        .find(|fixture| fixture.id == id)
        .map(|fixture| {
            fixture
                .languages
                .iter()
                .map(|(language, bytes)| (language.to_string(), *bytes))
                .collect()
        })
        .unwrap_or_default();

    Json(languages).into_response()
}

fn repository_json(fixture: &RepoFixture, base_url: &str) -> Value {
    json!({
        "id": fixture.id,
        "full_name": format!("mockuser/repo-{}", fixture.id),
        "fork": fixture.fork,
        "stargazers_count": fixture.stargazers_count,
        "forks_count": fixture.forks_count,
        "size": fixture.size,
        "languages_url": format!("{}/langs/{}", base_url, fixture.id),
    })
}

fn mock_failure(status: u16) -> Response {
    let status = StatusCode::from_u16(status).expect("Invalid mock status code");
    (status, Json(json!({ "message": "mock upstream failure" }))).into_response()
}
