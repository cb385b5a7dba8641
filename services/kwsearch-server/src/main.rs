//! kwsearch HTTP server entry point
//!
//! Serves keyword search over the configured index.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kwsearch::core::config::Config;
use kwsearch::core::services::Services;
use kwsearch::core::xdg::XdgDirs;
use kwsearch::http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kwsearch=info,tower_http=debug".into());
    let json_logs = std::env::var("KWSEARCH_LOG_FORMAT").is_ok_and(|v| v == "json");
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting kwsearch server");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.log_paths();
    xdg.ensure_dirs_exist()?;

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // Create shared services
    let services = Arc::new(Services::new(config.clone())?);

    match services.search.stats_async().await {
        Ok(stats) => tracing::info!(
            backend = services.store.backend_name(),
            keywords = stats.keywords,
            webpages = stats.webpages,
            occurrences = stats.occurrences,
            "Index opened"
        ),
        // Keep serving; searches answer 503 until storage comes back
        Err(e) => tracing::warn!("Index not readable at startup: {}", e),
    }

    let app = http::router(services);

    // Bind to address and start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
