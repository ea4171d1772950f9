use crate::error::ApiError;
use crate::metrics::UPSTREAM_ERRORS_TOTAL;
use crate::models::GithubUser;

pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
pub const USER_AGENT: &str = "github-profile-fetcher";

// One GET against the users endpoint. The client carries the request
// timeout, so a hanging upstream surfaces here as a timeout error
// instead of stalling the request forever.
pub async fn fetch_user(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
) -> Result<GithubUser, ApiError> {
    let url = format!("{}/users/{}", base_url.trim_end_matches('/'), username);

    let response = client
        .get(&url)
        .header("Accept", ACCEPT_HEADER)
        .header("User-Agent", USER_AGENT)
        .send()
        .await
        .map_err(|e| {
            UPSTREAM_ERRORS_TOTAL.inc();
            if e.is_timeout() {
                tracing::warn!(%url, "upstream request timed out");
                ApiError::UpstreamTimeout
            } else {
                ApiError::Internal(anyhow::anyhow!("upstream request failed: {}", e))
            }
        })?;

    let status = response.status();
    if status.as_u16() == 404 {
        return Err(ApiError::UserNotFound);
    }
    if !status.is_success() {
        UPSTREAM_ERRORS_TOTAL.inc();
        tracing::warn!(%url, status = status.as_u16(), "upstream returned error status");
        return Err(ApiError::Upstream(status.as_u16()));
    }

    response
        .json::<GithubUser>()
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to parse upstream body: {}", e)))
}
