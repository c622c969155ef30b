use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::TestContext;

#[tokio::test]
async fn test_monitoring_status_lists_registered_sites() {
    let ctx = TestContext::new();

    ctx.server
        .post("/create_website_info")
        .json(&json!({ "url": "example.com", "interval": 30 }))
        .await;

    let response = ctx.server.get("/monitoring_status").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["active_tasks"], 1);
    assert_eq!(body["sites"][0]["state"], "running");
    assert!(body["sites"][0].get("error").is_none());
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/metrics").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("site_monitor_active_site_tasks"));
}
