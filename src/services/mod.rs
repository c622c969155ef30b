pub mod metrics;
pub mod monitor;
pub mod url_validator;
