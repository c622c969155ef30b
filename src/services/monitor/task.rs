use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

use super::buffer::ResultSender;
use super::prober::Prober;
use super::types::{MonitorError, SiteOutcome};
use crate::modules::website::model::SiteConfig;
use crate::services::metrics::MetricsRegistry;

/// Periodic check loop for exactly one site.
pub struct SiteTask {
    site: SiteConfig,
    prober: Arc<Prober>,
    sender: ResultSender,
    metrics: Arc<MetricsRegistry>,
}

impl SiteTask {
    pub fn new(
        site: SiteConfig,
        prober: Arc<Prober>,
        sender: ResultSender,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            site,
            prober,
            sender,
            metrics,
        }
    }

    /// Probes the site, queues the result, then sleeps a full interval.
    ///
    /// The sleep starts after the probe returns, so two probes of the same
    /// site never overlap and the effective period is interval plus probe
    /// time. Only returns when the site is inactive, the buffer is gone or a
    /// probe fails to connect.
    pub async fn run(self) -> SiteOutcome {
        let Some(interval) = self.site.active_interval() else {
            tracing::info!(
                "Website {} has no interval specified, skip monitoring",
                self.site.url
            );
            return SiteOutcome::Inactive;
        };

        let pattern = match self.compile_pattern() {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::error!("Website {} not monitored: {}", self.site.url, err);
                return SiteOutcome::Failed(err);
            }
        };

        tracing::info!(
            website_id = self.site.id,
            "Monitoring website {} every {}s",
            self.site.url,
            interval
        );

        let pause = Duration::from_secs(u64::from(interval));
        loop {
            let probe = match self.prober.probe(&self.site.url, pattern.as_ref()).await {
                Ok(probe) => probe,
                Err(err) => {
                    self.metrics.probe_failures_total.inc();
                    tracing::error!(
                        website_id = self.site.id,
                        "Monitoring of website {} stopped: {}",
                        self.site.url,
                        err
                    );
                    return SiteOutcome::Failed(err);
                }
            };

            self.metrics
                .record_probe(probe.http_status_code, probe.response_time);

            if self.sender.push(probe.into_result(&self.site)).is_err() {
                tracing::info!("Result buffer closed, stop monitoring {}", self.site.url);
                return SiteOutcome::Closed;
            }

            tokio::time::sleep(pause).await;
        }
    }

    fn compile_pattern(&self) -> Result<Option<Regex>, MonitorError> {
        match self.site.regexp_pattern.as_deref() {
            Some(pattern) if !pattern.is_empty() => Ok(Some(Regex::new(pattern)?)),
            _ => Ok(None),
        }
    }
}
