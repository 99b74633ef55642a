use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserStatsError {
    #[error("GitHub API request to {url} failed with status {status}")]
    Upstream { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Cannot compute an average over zero repositories")]
    EmptyAggregation,
}

pub type Result<T> = std::result::Result<T, UserStatsError>;

impl UserStatsError {
    /// Status code this error maps to on the service's own response.
    ///
    /// An upstream failure is relayed with the status GitHub returned;
    /// failures between us and GitHub (network, malformed payloads)
    /// surface as a bad gateway.
    pub fn response_status(&self) -> StatusCode {
        match self {
            UserStatsError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            UserStatsError::Network(_) | UserStatsError::Json(_) => StatusCode::BAD_GATEWAY,
            UserStatsError::MissingParameter(_) | UserStatsError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            UserStatsError::Io(_) | UserStatsError::EmptyAggregation => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for UserStatsError {
    fn into_response(self) -> Response {
        let status = self.response_status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
