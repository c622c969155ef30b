use serde::Serialize;

/// Response of `GET /monitoring_status`.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorStatus {
    pub active_tasks: usize,
    pub sites: Vec<SiteTaskStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteTaskStatus {
    pub website_id: i64,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
