use chrono::Utc;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

use super::transport::{ProbeTransport, TransportError};
use super::types::{MonitorError, Probe};

/// Scheme used to reach monitored sites. There is no fallback to plain http.
pub const DEFAULT_SCHEME: &str = "https";

/// Performs one availability check against one URL.
///
/// Without a pattern the check is a HEAD request. With a pattern the body is
/// fetched with GET and searched for the pattern anywhere in it. The whole
/// exchange, body read included, runs under a hard timeout; hitting it yields
/// a synthetic 408 result instead of an error.
pub struct Prober {
    transport: Arc<dyn ProbeTransport>,
    timeout: Duration,
    scheme: String,
}

impl Prober {
    pub fn new(transport: Arc<dyn ProbeTransport>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn probe(&self, url: &str, pattern: Option<&Regex>) -> Result<Probe, MonitorError> {
        let target = format!("{}://{}", self.scheme, url);

        let request = async {
            match pattern {
                None => self.transport.head(&target).await.map(|status| (status, None)),
                Some(pattern) => {
                    let (status, body) = self.transport.get(&target).await?;
                    Ok((status, Some(pattern.is_match(&body))))
                }
            }
        };

        let request_timestamp = Utc::now();
        let outcome = tokio::time::timeout(self.timeout, request).await;
        let response_timestamp = Utc::now();

        match outcome {
            Ok(Ok((status, compliant))) => Ok(Probe::completed(
                request_timestamp,
                response_timestamp,
                status,
                compliant,
            )),
            Ok(Err(TransportError::Timeout)) | Err(_) => {
                tracing::warn!("Request to {} timed out after {:?}", target, self.timeout);
                Ok(Probe::timed_out(request_timestamp, response_timestamp, self.timeout))
            }
            Ok(Err(TransportError::Connection(message))) => {
                tracing::error!("Error connecting to website {}: {}", url, message);
                Err(MonitorError::Connection {
                    url: url.to_string(),
                    message,
                })
            }
        }
    }
}
