use async_trait::async_trait;

use super::model::MonitoringResult;
use crate::modules::StoreError;

/// Durable storage for monitoring results.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Writes the whole batch in one call. An empty batch is a no-op.
    async fn insert_batch(&self, results: &[MonitoringResult]) -> Result<(), StoreError>;
}
