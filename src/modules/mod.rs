pub mod error;
pub mod metrics;
pub mod monitor;
pub mod website;

pub use error::StoreError;
