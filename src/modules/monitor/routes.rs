use axum::{routing::get, Router};
use std::sync::Arc;

use super::controller::monitoring_status;
use crate::AppState;

pub fn monitor_routes() -> Router<Arc<AppState>> {
    Router::new().route("/monitoring_status", get(monitoring_status))
}
