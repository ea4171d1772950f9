mod health;
mod metrics;
mod profile;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use profile::profile_handler;
