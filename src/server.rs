use crate::error::{Result, UserStatsError};
use crate::github::GitHubClient;
use crate::models::UserStats;
use crate::stats;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared by all routes.
#[derive(Clone)]
pub struct AppState {
    pub github: GitHubClient,
}

/// Minimal form for exercising the stats endpoint from a browser.
const INDEX_HTML: &str = "<!DOCTYPE html>\n\
<html>\n\
<head><title>GitHub User Stats</title></head>\n\
<body>\n\
  <h1>GitHub User Stats</h1>\n\
  <form action=\"/getuserstats\" method=\"get\">\n\
    <label>Username: <input type=\"text\" name=\"username\"></label>\n\
    <label>Include forks: <select name=\"forked\">\n\
      <option value=\"true\">true</option>\n\
      <option value=\"false\">false</option>\n\
    </select></label>\n\
    <input type=\"submit\" value=\"Get stats\">\n\
  </form>\n\
</body>\n\
</html>\n";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/getuserstats", get(get_user_stats))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn start_server(state: AppState, port: u16) -> Result<()> {
    let app = router(state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("User stats server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub username: Option<String>,
    pub forked: Option<String>,
}

/// Aggregated stats for one GitHub user.
async fn get_user_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<UserStats>> {
    let username = parse_username(params.username.as_deref())?;
    let include_forks = parse_forked(params.forked.as_deref())?;

    info!("Aggregating stats for {} (include_forks: {})", username, include_forks);

    let repositories = state
        .github
        .fetch_user_repositories(username, include_forks)
        .await?;
    let user_stats = stats::summarize(&repositories)?;

    Ok(Json(user_stats))
}

fn parse_username(raw: Option<&str>) -> Result<&str> {
    match raw {
        Some(username) if !username.is_empty() => Ok(username),
        _ => Err(UserStatsError::MissingParameter("username")),
    }
}

/// Absent means "include forks"; anything other than a boolean string is
/// rejected before the upstream fetch starts.
fn parse_forked(raw: Option<&str>) -> Result<bool> {
    match raw {
        None => Ok(true),
        Some(value) => match value.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(UserStatsError::InvalidParameter {
                name: "forked",
                value: value.to_string(),
            }),
        },
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness probe.
async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
