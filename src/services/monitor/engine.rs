use std::sync::Arc;
use std::time::Duration;

use super::buffer::result_buffer;
use super::persister::{FlushOutcome, Persister};
use super::prober::Prober;
use super::scheduler::Scheduler;
use super::transport::ProbeTransport;
use super::types::SiteOutcome;
use crate::config::MonitoringSettings;
use crate::modules::monitor::ResultSink;
use crate::modules::website::model::SiteConfig;
use crate::services::metrics::MetricsRegistry;

/// Wires the scheduler, the result buffer and the persister together and
/// drives the supervision and flush loop.
pub struct MonitorEngine {
    scheduler: Arc<Scheduler>,
    persister: Persister,
    wait_time: Duration,
}

impl MonitorEngine {
    pub fn new(
        settings: &MonitoringSettings,
        transport: Arc<dyn ProbeTransport>,
        sink: Arc<dyn ResultSink>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        let prober = Prober::new(transport, settings.request_timeout);
        Self::with_prober(settings, prober, sink, metrics)
    }

    pub fn with_prober(
        settings: &MonitoringSettings,
        prober: Prober,
        sink: Arc<dyn ResultSink>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        let (sender, receiver) = result_buffer();
        let scheduler = Scheduler::new(Arc::new(prober), sender, metrics.clone());
        let persister = Persister::new(receiver, sink, settings.results_batch_save_size, metrics);

        Self {
            scheduler: Arc::new(scheduler),
            persister,
            wait_time: settings.results_worker_wait_time,
        }
    }

    /// Handle used to register sites added while the engine runs.
    pub fn scheduler(&self) -> Arc<Scheduler> {
        self.scheduler.clone()
    }

    /// Starts monitoring `sites` and loops until the process exits.
    pub async fn run(mut self, sites: Vec<SiteConfig>) {
        self.scheduler.start(sites).await;

        loop {
            self.run_cycle().await;
        }
    }

    /// One pass of the loop: collect ended tasks, then flush one batch, or
    /// idle for the wait time when there was nothing to flush.
    pub async fn run_cycle(&mut self) -> FlushOutcome {
        for (website_id, outcome) in self.scheduler.reap().await {
            match outcome {
                SiteOutcome::Failed(err) => {
                    tracing::warn!("Website {} is no longer monitored: {}", website_id, err)
                }
                SiteOutcome::Inactive | SiteOutcome::Closed => {
                    tracing::debug!("Task of website {} ended", website_id)
                }
            }
        }

        tracing::debug!("Num of site tasks: {}", self.scheduler.live_tasks().await);

        let outcome = self.persister.flush().await;
        if outcome.is_idle() {
            tokio::time::sleep(self.wait_time).await;
        }
        outcome
    }
}
