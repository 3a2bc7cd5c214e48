//! SafeScan Web - Main entry point.

use anyhow::Result;
use safescan_common::config::Config;
use safescan_common::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load_with_env()?;

    // Initialize logging
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("SafeScan Web v{}", env!("CARGO_PKG_VERSION"));

    // Start the web server
    safescan_web::start_server(&config).await
}
