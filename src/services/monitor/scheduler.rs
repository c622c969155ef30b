use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::buffer::ResultSender;
use super::prober::Prober;
use super::task::SiteTask;
use super::types::{MonitorError, SiteOutcome, SiteStatus};
use crate::modules::website::model::SiteConfig;
use crate::services::metrics::MetricsRegistry;

/// Supervisor of the site tasks, keyed by website id.
///
/// Finished tasks stay in the map until [`Scheduler::reap`] collects their
/// outcome, which then becomes the site's recorded status. Tasks are never
/// restarted automatically.
pub struct Scheduler {
    prober: Arc<Prober>,
    sender: ResultSender,
    metrics: Arc<MetricsRegistry>,
    tasks: Mutex<HashMap<i64, JoinHandle<SiteOutcome>>>,
    statuses: Mutex<HashMap<i64, SiteStatus>>,
}

impl Scheduler {
    pub fn new(prober: Arc<Prober>, sender: ResultSender, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            prober,
            sender,
            metrics,
            tasks: Mutex::new(HashMap::new()),
            statuses: Mutex::new(HashMap::new()),
        }
    }

    /// Launches one task per site. Returns the number of tasks launched.
    pub async fn start(&self, sites: Vec<SiteConfig>) -> usize {
        let count = sites.len();
        for site in sites {
            self.register(site).await;
        }
        tracing::info!("Launched monitoring for {} websites", count);
        count
    }

    /// Launches the task of one site.
    ///
    /// A task still running for the same id is aborted first, so each site
    /// has at most one live task.
    pub async fn register(&self, site: SiteConfig) {
        let id = site.id;
        let url = site.url.clone();
        let task = SiteTask::new(
            site,
            self.prober.clone(),
            self.sender.clone(),
            self.metrics.clone(),
        );

        let mut tasks = self.tasks.lock().await;
        if let Some(previous) = tasks.remove(&id) {
            if !previous.is_finished() {
                tracing::info!("Restarting monitoring of website {}", url);
                previous.abort();
            }
        }
        tasks.insert(id, tokio::spawn(task.run()));
        self.statuses.lock().await.insert(id, SiteStatus::Running);
        self.metrics.active_site_tasks.set(tasks.len() as f64);
    }

    /// Collects the outcome of every task that has ended since the last call.
    pub async fn reap(&self) -> Vec<(i64, SiteOutcome)> {
        let mut tasks = self.tasks.lock().await;
        let finished: Vec<i64> = tasks
            .iter()
            .filter(|(_, handle)| handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        let mut outcomes = Vec::with_capacity(finished.len());
        for id in finished {
            let Some(handle) = tasks.remove(&id) else {
                continue;
            };
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => SiteOutcome::Failed(MonitorError::Panicked(err.to_string())),
            };
            self.statuses.lock().await.insert(id, SiteStatus::from(&outcome));
            outcomes.push((id, outcome));
        }

        self.metrics.active_site_tasks.set(tasks.len() as f64);
        outcomes
    }

    /// Number of tasks that have not ended yet.
    pub async fn live_tasks(&self) -> usize {
        self.tasks
            .lock()
            .await
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub async fn status(&self, website_id: i64) -> Option<SiteStatus> {
        self.statuses.lock().await.get(&website_id).cloned()
    }

    /// Recorded status of every site ever registered, ordered by id.
    pub async fn statuses(&self) -> Vec<(i64, SiteStatus)> {
        let mut statuses: Vec<(i64, SiteStatus)> = self
            .statuses
            .lock()
            .await
            .iter()
            .map(|(id, status)| (*id, status.clone()))
            .collect();
        statuses.sort_by_key(|(id, _)| *id);
        statuses
    }
}
