//! Integration tests for the kwsearch HTTP API
//!
//! Tests the JSON and HTML search routes, stats, health, and error
//! mapping end to end.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use kwsearch::core::services::Services;
use kwsearch::core::types::*;
use kwsearch::http;
use tower::ServiceExt as TowerServiceExt;

use crate::common::{sqlite_services, unavailable_services, IndexBuilder};

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1_000_000)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1_000_000)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn app(services: Arc<Services>) -> Router {
    http::router(services)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let response = get(&app(services), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[tokio::test]
async fn test_json_search_ranks_results() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let response = get(&app(services), "/api/v1/search?q=cat%20dog").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["status"], "hits");
    assert_eq!(json["count"], 2);
    assert_eq!(json["terms"], serde_json::json!(["cat", "dog"]));
    assert_eq!(json["results"][0]["document_id"], 3);
    assert_eq!(json["results"][1]["document_id"], 2);
}

#[tokio::test]
async fn test_json_search_limit_param() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let response = get(&app(services), "/api/v1/search?q=dog&limit=1").await;

    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["document_id"], 3);
}

#[tokio::test]
async fn test_json_search_empty_and_missing_query() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let app = app(services);

    for uri in ["/api/v1/search", "/api/v1/search?q=", "/api/v1/search?q=%21%3F"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
        let json = body_json(response).await;
        assert_eq!(json["status"], "empty_query");
        assert_eq!(json["count"], 0);
    }
}

#[tokio::test]
async fn test_json_search_no_match() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let response = get(&app(services), "/api/v1/search?q=cat+unicorn").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "no_match");
}

#[tokio::test]
async fn test_storage_failure_is_503() {
    let (services, _temp) = unavailable_services();
    let app = app(services);

    let response = get(&app, "/api/v1/search?q=cat").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], 503);
    assert!(json["error"].as_str().unwrap().contains("Storage unavailable"));

    let response = get(&app, "/api/v1/stats").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    // An empty query still answers without storage
    let response = get(&app, "/api/v1/search?q=").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_overlong_query_is_400() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let uri = format!("/api/v1/search?q={}", "a".repeat(600));
    let response = get(&app(services), &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_endpoint() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let response = get(&app(services), "/api/v1/stats").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();
    let stats: IndexStats = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats.webpages, 4);
    assert_eq!(stats.keywords, 3);
    assert_eq!(stats.occurrences, 7);
}

#[tokio::test]
async fn test_html_search_escapes_stored_content() {
    let snapshot = IndexBuilder::new()
        .titled_page(
            1,
            "<script>alert('t')</script>",
            "https://evil.example/?a=1&b=\"2\"",
            "<img src=x onerror=alert(1)> body",
        )
        .link("evil", 1, 1.0)
        .build();
    let (services, _temp) = sqlite_services(&snapshot);

    let response = get(&app(services), "/search?q=evil").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_string(response).await;
    assert!(html.contains("&lt;script&gt;alert(&#39;t&#39;)&lt;/script&gt;"));
    assert!(html.contains("a=1&amp;b=&quot;2&quot;"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img"));
}

#[tokio::test]
async fn test_html_search_escapes_query() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let response = get(&app(services), "/search?q=%3Cb%3Ecat%3C%2Fb%3E").await;

    let html = body_string(response).await;
    assert!(html.contains("&lt;b&gt;cat&lt;/b&gt;"));
    assert!(!html.contains("<b>cat</b>"));
}

#[tokio::test]
async fn test_html_zero_results_message() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let html = body_string(get(&app(services), "/search?q=unicorn").await).await;
    assert!(html.contains("0 results"));
}

#[tokio::test]
async fn test_html_storage_failure_is_503() {
    let (services, _temp) = unavailable_services();
    let response = get(&app(services), "/search?q=cat").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = body_string(response).await;
    assert!(html.contains("class=\"error\""));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (services, _temp) = sqlite_services(&IndexBuilder::cat_dog());
    let response = get(&app(services), "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
