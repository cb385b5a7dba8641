//! HTTP adapter
//!
//! Depends only on core/. Never imports from cli/.
//!
//! Serves the search pipeline as JSON under `/api/v1` and as an
//! escaped HTML page under `/search`, via the Axum web framework.

pub mod error;
pub mod handlers;
pub mod middleware;

pub use handlers::*;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::services::Services;

/// Build the application router with all routes and middleware
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_handler))
        // Browser-facing results page
        .route("/search", get(html_search_handler))
        // API v1 endpoints
        .route("/api/v1/search", get(search_handler))
        .route("/api/v1/stats", get(stats_handler))
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(services)
}
