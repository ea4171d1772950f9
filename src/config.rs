use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "github-gateway")]
#[command(about = "Rate-limited gateway for GitHub user profiles")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // GitHub API base url
    #[arg(short, long, default_value = "https://api.github.com")]
    pub github_url: String,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 10)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub upstream_timeout: u64,

    // How often to sweep expired rate limit windows, in seconds
    #[arg(long, default_value_t = 60)]
    pub sweep_interval: u64,
}
