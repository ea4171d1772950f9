use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::github;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::ProfileView;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProfileQuery {
    username: Option<String>,
}

// Headerless clients all land in one shared bucket
fn client_key(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

pub async fn profile_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProfileQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    REQUEST_TOTAL.inc();

    let username = match query.username.as_deref() {
        Some(u) if !u.is_empty() => u,
        _ => return Err(ApiError::MissingUsername),
    };

    // rate limit check happens before any upstream traffic
    let key = client_key(&headers);
    let decision = state.limiter.check(key);
    if !decision.admitted {
        RATE_LIMITED_TOTAL.inc();
        tracing::warn!(client = key, count = decision.count, "rate limit exceeded");
        return Err(ApiError::RateLimited(decision));
    }
    tracing::debug!(client = key, remaining = decision.remaining(), "request admitted");

    let start_time = Instant::now();
    let user = github::fetch_user(&state.client, &state.github_url, username).await?;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    let response_headers = [
        (
            header::CACHE_CONTROL,
            "public, max-age=60, s-maxage=120".to_string(),
        ),
        (
            HeaderName::from_static("x-ratelimit-limit"),
            decision.limit.to_string(),
        ),
        (
            HeaderName::from_static("x-ratelimit-remaining"),
            decision.remaining().to_string(),
        ),
        (
            HeaderName::from_static("x-ratelimit-reset"),
            decision.reset_epoch_secs().to_string(),
        ),
    ];

    Ok((response_headers, Json(ProfileView::from(user))).into_response())
}
