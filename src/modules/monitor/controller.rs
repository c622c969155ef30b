use axum::{extract::State, Json};
use std::sync::Arc;

use crate::modules::monitor::schema::{MonitorStatus, SiteTaskStatus};
use crate::AppState;

/// Handler for GET /monitoring_status
pub async fn monitoring_status(State(state): State<Arc<AppState>>) -> Json<MonitorStatus> {
    let active_tasks = state.scheduler.live_tasks().await;
    let sites = state
        .scheduler
        .statuses()
        .await
        .into_iter()
        .map(|(website_id, status)| SiteTaskStatus {
            website_id,
            state: status.as_str(),
            error: status.error().map(str::to_string),
        })
        .collect();

    Json(MonitorStatus {
        active_tasks,
        sites,
    })
}
