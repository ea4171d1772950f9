use axum::{
    Json,
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::rate_limit::Decision;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("username is required")]
    MissingUsername,
    #[error("rate limit exceeded")]
    RateLimited(Decision),
    #[error("github user not found")]
    UserNotFound,
    #[error("upstream returned status {0}")]
    Upstream(u16),
    #[error("upstream request timed out")]
    UpstreamTimeout,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

fn error_body(msg: &str) -> Json<serde_json::Value> {
    Json(json!({ "error": msg }))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingUsername => {
                (StatusCode::BAD_REQUEST, error_body("Username is required")).into_response()
            }
            ApiError::RateLimited(decision) => {
                let headers = [
                    (
                        HeaderName::from_static("x-ratelimit-limit"),
                        decision.limit.to_string(),
                    ),
                    (
                        HeaderName::from_static("x-ratelimit-remaining"),
                        "0".to_string(),
                    ),
                    (
                        HeaderName::from_static("x-ratelimit-reset"),
                        decision.reset_epoch_secs().to_string(),
                    ),
                ];
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    headers,
                    error_body("Rate limit exceeded. Try again later."),
                )
                    .into_response()
            }
            ApiError::UserNotFound => {
                (StatusCode::NOT_FOUND, error_body("GitHub user not found")).into_response()
            }
            ApiError::Upstream(status) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, error_body("Error fetching data from GitHub API")).into_response()
            }
            ApiError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                error_body("Error fetching data from GitHub API"),
            )
                .into_response(),
            ApiError::Internal(err) => {
                // full detail stays in the logs, caller only gets the generic message
                tracing::error!(error = %err, "unexpected error handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("Internal server error"),
                )
                    .into_response()
            }
        }
    }
}
