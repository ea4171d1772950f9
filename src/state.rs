use crate::rate_limit::RateLimiter;

// app's shared state
pub struct AppState {
    pub client: reqwest::Client,
    pub github_url: String, // upstream base url, overridable for tests
    pub limiter: RateLimiter,
}
