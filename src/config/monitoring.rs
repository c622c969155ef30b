use std::time::Duration;

/// Timeout in seconds for each website request.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Wait time in seconds before looking for the next batch of results.
pub const RESULTS_WORKER_WAIT_TIME_SECS: u64 = 3;
/// Maximum number of monitoring results saved in one batch.
pub const RESULTS_BATCH_SAVE_SIZE: usize = 100;

/// Tunables of the monitoring engine.
#[derive(Debug, Clone)]
pub struct MonitoringSettings {
    pub request_timeout: Duration,
    pub results_worker_wait_time: Duration,
    pub results_batch_save_size: usize,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            results_worker_wait_time: Duration::from_secs(RESULTS_WORKER_WAIT_TIME_SECS),
            results_batch_save_size: RESULTS_BATCH_SAVE_SIZE,
        }
    }
}
