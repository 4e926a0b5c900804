//! HTTP API integration tests
//!
//! Drive the full router with `oneshot` requests and check both the JSON
//! responses and the resulting store state.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pulse::analytics::AggregationEngine;
use pulse::api;
use pulse::config::FrontendConfig;
use pulse::store::StatsStore;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceExt;

/// Helper to build a router over a fresh store
fn create_test_app() -> (Router, Arc<StatsStore>) {
    let store = Arc::new(StatsStore::new());
    let engine = AggregationEngine::new(Arc::clone(&store));
    let app = api::create_router(engine, FrontendConfig { static_dir: None }, Instant::now());
    (app, store)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_click_and_conversion_scenario() {
    let (app, store) = create_test_app();

    for body in [
        r#"{"campaign_id": "C1", "user_id": "u1", "source": "google"}"#,
        r#"{"campaign_id": "C1", "user_id": "u2"}"#,
    ] {
        let response = app.clone().oneshot(post_json("/api/click", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Click event recorded");
    }

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/conversion",
            r#"{"campaign_id": "C1", "user_id": "u1", "amount": 50.0, "product": "hat"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Conversion event recorded");

    let response = app
        .oneshot(get("/api/analytics?campaign_id=C1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["campaign_id"], "C1");
    assert_eq!(json["total_clicks"], 2);
    assert_eq!(json["total_conversions"], 1);
    assert_eq!(json["total_revenue"], 50.0);
    assert_eq!(json["conversion_rate"], 50.0);
    assert!(json.get("unique_users").is_none());

    let stats = store.read_one("C1").await.unwrap();
    assert_eq!(stats.unique_user_count(), 2);
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let (app, store) = create_test_app();

    let response = app
        .clone()
        .oneshot(post_json("/api/click", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid JSON");

    // Missing amount
    let response = app
        .oneshot(post_json(
            "/api/conversion",
            r#"{"campaign_id": "C1", "user_id": "u1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_event_without_content_type_is_recorded() {
    let (app, store) = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/click")
        .body(Body::from(r#"{"campaign_id":"C1","user_id":"u1"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("POST")
        .uri("/api/conversion")
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"campaign_id":"C1","user_id":"u1","amount":4.5}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = store.read_one("C1").await.unwrap();
    assert_eq!(stats.total_clicks, 1);
    assert_eq!(stats.total_conversions, 1);
    assert_eq!(stats.total_revenue, 4.5);
}

#[tokio::test]
async fn test_wrong_method_not_allowed() {
    let (app, _store) = create_test_app();

    let response = app.oneshot(get("/api/click")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_campaign_not_found() {
    let (app, store) = create_test_app();

    let response = app
        .oneshot(get("/api/analytics?campaign_id=never_seen"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Campaign not found");

    // A lookup must not create a record
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_analytics_without_id_returns_mapping() {
    let (app, _store) = create_test_app();

    for campaign in ["A", "B"] {
        let body = format!(r#"{{"campaign_id": "{}", "user_id": "u1"}}"#, campaign);
        app.clone()
            .oneshot(post_json("/api/click", &body))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/api/analytics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let map = json.as_object().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["A"]["total_clicks"], 1);
    assert_eq!(map["B"]["campaign_id"], "B");
}

#[tokio::test]
async fn test_health_reports_campaign_count() {
    let (app, _store) = create_test_app();

    app.clone()
        .oneshot(post_json(
            "/api/conversion",
            r#"{"campaign_id": "C9", "user_id": "u1", "amount": 1.5}"#,
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["data"]["total_campaigns"], 1);
    assert!(json["data"]["uptime"].is_string());
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_dashboard_served_at_root() {
    let (app, _store) = create_test_app();

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).contains("/api/analytics"));

    // Unknown API routes are not swallowed by the dashboard
    let response = app.oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
