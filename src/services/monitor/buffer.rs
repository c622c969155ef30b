use tokio::sync::mpsc;

use crate::modules::monitor::MonitoringResult;

/// Returned when the receiving side of the buffer has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Result buffer is closed")]
pub struct BufferClosed;

/// Creates the queue between site tasks and the persister.
///
/// The queue is unbounded and FIFO. Senders are cheap to clone, one per site
/// task; the receiver is owned by the persister alone.
pub fn result_buffer() -> (ResultSender, ResultReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ResultSender { tx }, ResultReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct ResultSender {
    tx: mpsc::UnboundedSender<MonitoringResult>,
}

impl ResultSender {
    pub fn push(&self, result: MonitoringResult) -> Result<(), BufferClosed> {
        self.tx.send(result).map_err(|_| BufferClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct ResultReceiver {
    rx: mpsc::UnboundedReceiver<MonitoringResult>,
}

impl ResultReceiver {
    /// Detaches up to `max` results from the front of the queue, oldest
    /// first. Never waits: an empty queue yields an empty batch.
    pub fn pop_batch(&mut self, max: usize) -> Vec<MonitoringResult> {
        let mut batch = Vec::with_capacity(max.min(self.rx.len()));
        while batch.len() < max {
            match self.rx.try_recv() {
                Ok(result) => batch.push(result),
                Err(_) => break,
            }
        }
        batch
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
