//! HTTP request handlers for the kwsearch API
//!
//! Four endpoints: health, JSON search, HTML search and index stats.
//! Storage work runs on the blocking pool through
//! [`SearchService`](crate::core::search::SearchService), so a slow
//! database never stalls the async runtime.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::core::error::KwSearchError;
use crate::core::search::{escape_html, render_html};
use crate::core::services::Services;
use crate::core::types::*;

use super::error::status_code;

/// Query-string parameters accepted by both search routes
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text query; a missing parameter is an empty query
    #[serde(default)]
    pub q: String,

    /// Optional cap below the configured maximum
    pub limit: Option<usize>,
}

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// JSON search handler
///
/// Empty queries and queries without matches answer 200 with a
/// `status` of `empty_query` or `no_match`. Storage failures answer 503.
///
/// # Errors
///
/// - `InvalidQuery`: query exceeds the configured length
/// - `StorageUnavailable`: the index could not be read in time
pub async fn search_handler(
    State(services): State<Arc<Services>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, KwSearchError> {
    let response = services.search.search_async(params.q, params.limit).await?;
    Ok(Json(response))
}

/// HTML search handler
///
/// Renders a complete results page. Errors are rendered as HTML too,
/// with the same status codes as the JSON route.
pub async fn html_search_handler(
    State(services): State<Arc<Services>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.clone();
    match services.search.search_async(params.q, params.limit).await {
        Ok(response) => Html(page(&query, &render_html(&query, &response.outcome))).into_response(),
        Err(e) => {
            let status = status_code(&e);
            tracing::warn!(error = %e, "Search page failed");
            let body = format!(
                "<section class=\"error\"><p>{}</p></section>\n",
                escape_html(&e.message())
            );
            (status, Html(page(&query, &body))).into_response()
        }
    }
}

/// Index statistics handler
pub async fn stats_handler(
    State(services): State<Arc<Services>>,
) -> Result<Json<IndexStats>, KwSearchError> {
    let stats = services.search.stats_async().await?;
    Ok(Json(stats))
}

/// Wrap a results fragment in a page with the search form
fn page(query: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>kwsearch</title></head>\n\
         <body>\n\
         <form action=\"/search\" method=\"get\">\
         <input type=\"search\" name=\"q\" value=\"{}\" autofocus> \
         <button type=\"submit\">Search</button></form>\n\
         {body}\
         </body>\n\
         </html>\n",
        escape_html(query)
    )
}
