pub mod buffer;
pub mod engine;
pub mod persister;
pub mod prober;
pub mod scheduler;
pub mod task;
pub mod transport;
pub mod types;

pub use buffer::{result_buffer, ResultReceiver, ResultSender};
pub use engine::MonitorEngine;
pub use persister::{FlushOutcome, Persister, StatusHistogram};
pub use prober::Prober;
pub use scheduler::Scheduler;
pub use task::SiteTask;
pub use transport::{ProbeTransport, ReqwestTransport, TransportError};
pub use types::{MonitorError, Probe, SiteOutcome, SiteStatus, REQUEST_TIMEOUT_STATUS};
