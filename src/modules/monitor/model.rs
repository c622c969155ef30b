use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed check of one site, as stored in `website_monitoring`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringResult {
    pub request_timestamp: DateTime<Utc>,
    pub response_timestamp: DateTime<Utc>,
    /// Seconds between request and response, or the request timeout when the
    /// check timed out.
    pub response_time: f64,
    pub http_status_code: u16,
    pub url: String,
    pub website_id: i64,
    /// `None` when the site has no pattern configured.
    pub is_regex_pattern_compliant: Option<bool>,
}
