//! # ReqRes Users Server
//!
//! Main entry point for the ReqRes user listing service.

use reqres_config::ConfigLoader;
use reqres_core::telemetry::init_logging;
use reqres_core::ReqResResult;
use reqres_server::app::AppBuilder;
use reqres_server::startup::print_banner;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Logging may not be initialised if configuration failed to load.
        eprintln!("Application error: {}", e);
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> ReqResResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_logging(&config.observability)?;
    print_banner();

    info!("Starting ReqRes Users Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    AppBuilder::new().with_config(config).run().await
}
