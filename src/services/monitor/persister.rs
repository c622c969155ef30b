use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::buffer::ResultReceiver;
use crate::modules::monitor::{MonitoringResult, ResultSink};
use crate::modules::StoreError;
use crate::services::metrics::MetricsRegistry;

/// Count of results per HTTP status code, most frequent first.
///
/// Codes with the same count are ordered by ascending code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusHistogram {
    entries: Vec<(u16, usize)>,
}

impl StatusHistogram {
    pub fn from_results(results: &[MonitoringResult]) -> Self {
        let mut counts: BTreeMap<u16, usize> = BTreeMap::new();
        for result in results {
            *counts.entry(result.http_status_code).or_default() += 1;
        }

        let mut entries: Vec<(u16, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        Self { entries }
    }

    pub fn entries(&self) -> &[(u16, usize)] {
        &self.entries
    }

    pub fn count(&self, status_code: u16) -> usize {
        self.entries
            .iter()
            .find(|(code, _)| *code == status_code)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for StatusHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (code, count)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", code, count)?;
        }
        write!(f, "}}")
    }
}

/// What a single flush cycle did.
#[derive(Debug)]
pub enum FlushOutcome {
    /// The buffer was empty, nothing was written.
    Idle,
    Saved {
        count: usize,
        histogram: StatusHistogram,
    },
    /// The sink rejected the batch. The results are gone either way.
    Dropped { count: usize, error: StoreError },
}

impl FlushOutcome {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Drains the result buffer into the result sink in bounded batches.
pub struct Persister {
    receiver: ResultReceiver,
    sink: Arc<dyn ResultSink>,
    batch_size: usize,
    metrics: Arc<MetricsRegistry>,
}

impl Persister {
    pub fn new(
        receiver: ResultReceiver,
        sink: Arc<dyn ResultSink>,
        batch_size: usize,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            receiver,
            sink,
            batch_size: batch_size.max(1),
            metrics,
        }
    }

    /// Results waiting to be flushed.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Pops at most one batch and hands it to the sink.
    ///
    /// Results leave the buffer before the write is attempted, so a failed
    /// write loses the batch. The failure is logged and reported in the
    /// outcome, never returned as an error.
    pub async fn flush(&mut self) -> FlushOutcome {
        let batch = self.receiver.pop_batch(self.batch_size);
        if batch.is_empty() {
            return FlushOutcome::Idle;
        }

        let count = batch.len();
        let histogram = StatusHistogram::from_results(&batch);

        match self.sink.insert_batch(&batch).await {
            Ok(()) => {
                self.metrics.results_saved_total.inc_by(count as f64);
                tracing::info!(
                    "Saved {} websites, http status codes breakdown: {}",
                    count,
                    histogram
                );
                FlushOutcome::Saved { count, histogram }
            }
            Err(error) => {
                self.metrics.results_dropped_total.inc_by(count as f64);
                tracing::error!("Could not save {} monitoring results, err: {}", count, error);
                FlushOutcome::Dropped { count, error }
            }
        }
    }
}
