use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::monitoring::MonitoringSettings;

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub monitoring: MonitoringSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let port = parse_var("PORT", 8000u16)?;

        let defaults = MonitoringSettings::default();
        let request_timeout = parse_var("REQUEST_TIMEOUT_SECS", defaults.request_timeout.as_secs())?;
        let wait_time = parse_var(
            "RESULTS_WORKER_WAIT_TIME_SECS",
            defaults.results_worker_wait_time.as_secs(),
        )?;
        let batch_size = parse_var("RESULTS_BATCH_SAVE_SIZE", defaults.results_batch_save_size)?;

        if batch_size == 0 {
            return Err("RESULTS_BATCH_SAVE_SIZE must be greater than zero".to_string());
        }

        Ok(Self {
            database_url,
            port,
            monitoring: MonitoringSettings {
                request_timeout: Duration::from_secs(request_timeout),
                results_worker_wait_time: Duration::from_secs(wait_time),
                results_batch_save_size: batch_size,
            },
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}
