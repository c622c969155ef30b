pub mod config;
pub mod modules;
pub mod services;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use modules::metrics::metrics_routes;
use modules::monitor::monitor_routes;
use modules::website::{website_routes, SiteRepository};
use services::metrics::MetricsRegistry;
use services::monitor::Scheduler;

pub struct AppState {
    pub sites: Arc<dyn SiteRepository>,
    pub scheduler: Arc<Scheduler>,
    pub metrics: Arc<MetricsRegistry>,
}

pub fn create_app(
    sites: Arc<dyn SiteRepository>,
    scheduler: Arc<Scheduler>,
    metrics: Arc<MetricsRegistry>,
) -> Router {
    let state = Arc::new(AppState {
        sites,
        scheduler,
        metrics,
    });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(website_routes())
        .merge(monitor_routes())
        .merge(metrics_routes())
        .layer(RequestBodyLimitLayer::new(1024 * 16)) // 16KB max body
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "Website Monitoring API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
