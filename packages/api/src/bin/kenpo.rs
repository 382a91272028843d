//! CLI entry point for content maintenance.

use osaka_kenpo_api::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // WARN by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    if let Err(e) = cli::run().await {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}
