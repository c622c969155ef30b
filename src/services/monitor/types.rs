use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::modules::monitor::MonitoringResult;
use crate::modules::website::model::SiteConfig;

/// Status code recorded when a check hits the request timeout.
pub const REQUEST_TIMEOUT_STATUS: u16 = 408;

/// Measurement of a single check, before it is tied to a site.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub request_timestamp: DateTime<Utc>,
    pub response_timestamp: DateTime<Utc>,
    pub response_time: f64,
    pub http_status_code: u16,
    pub is_regex_pattern_compliant: Option<bool>,
}

impl Probe {
    pub fn completed(
        request_timestamp: DateTime<Utc>,
        response_timestamp: DateTime<Utc>,
        http_status_code: u16,
        is_regex_pattern_compliant: Option<bool>,
    ) -> Self {
        // Wall clock can step backwards; clamp to zero.
        let response_time = (response_timestamp - request_timestamp)
            .to_std()
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or(0.0);

        Self {
            request_timestamp,
            response_timestamp,
            response_time,
            http_status_code,
            is_regex_pattern_compliant,
        }
    }

    /// A check that ran into the request timeout. The response time is the
    /// timeout itself, not the elapsed time.
    pub fn timed_out(
        request_timestamp: DateTime<Utc>,
        response_timestamp: DateTime<Utc>,
        timeout: Duration,
    ) -> Self {
        Self {
            request_timestamp,
            response_timestamp,
            response_time: timeout.as_secs_f64(),
            http_status_code: REQUEST_TIMEOUT_STATUS,
            is_regex_pattern_compliant: None,
        }
    }

    /// Attaches the site identity, producing the record that gets persisted.
    pub fn into_result(self, site: &SiteConfig) -> MonitoringResult {
        MonitoringResult {
            request_timestamp: self.request_timestamp,
            response_timestamp: self.response_timestamp,
            response_time: self.response_time,
            http_status_code: self.http_status_code,
            url: site.url.clone(),
            website_id: site.id,
            is_regex_pattern_compliant: self.is_regex_pattern_compliant,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Error connecting to website {url}: {message}")]
    Connection { url: String, message: String },
    #[error("Invalid regexp pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Site task panicked: {0}")]
    Panicked(String),
}

/// How a site task ended.
#[derive(Debug)]
pub enum SiteOutcome {
    /// The site has no interval, nothing was scheduled.
    Inactive,
    /// The result buffer went away, so there is nobody left to report to.
    Closed,
    Failed(MonitorError),
}

/// Supervisor view of one site.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteStatus {
    Running,
    Inactive,
    Stopped,
    Failed(String),
}

impl SiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Inactive => "inactive",
            Self::Stopped => "stopped",
            Self::Failed(_) => "failed",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl From<&SiteOutcome> for SiteStatus {
    fn from(outcome: &SiteOutcome) -> Self {
        match outcome {
            SiteOutcome::Inactive => Self::Inactive,
            SiteOutcome::Closed => Self::Stopped,
            SiteOutcome::Failed(err) => Self::Failed(err.to_string()),
        }
    }
}
