use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use github_gateway::config::Args;
use github_gateway::metrics::ACTIVE_WINDOWS;
use github_gateway::rate_limit::RateLimiter;
use github_gateway::state::AppState;
use github_gateway::{build_router, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();
    let args = Args::parse();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.upstream_timeout))
        .build()?;

    let state = Arc::new(AppState {
        client,
        github_url: args.github_url.clone(),
        limiter: RateLimiter::new(args.rate_limit, Duration::from_secs(args.rate_window)),
    });

    // background sweeper - evicts expired rate limit windows
    let sweep_state = state.clone();
    let sweep_every = Duration::from_secs(args.sweep_interval);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            sweep_state.limiter.sweep();
            ACTIVE_WINDOWS.set(sweep_state.limiter.active_windows() as f64);
        }
    });

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(port = args.port, upstream = %args.github_url, "gateway listening");
    info!(
        limit = args.rate_limit,
        window_secs = args.rate_window,
        "rate limit configured"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
