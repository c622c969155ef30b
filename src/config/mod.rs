pub mod database;
pub mod environment;
pub mod monitoring;

pub use database::{check_db, init_db, DbPool};
pub use monitoring::MonitoringSettings;
