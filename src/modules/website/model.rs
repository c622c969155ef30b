use serde::{Deserialize, Serialize};

/// A registered site as stored in `website_info`.
///
/// `interval` is the pause between two checks in seconds; zero or `None`
/// means the site is stored but not monitored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteConfig {
    pub id: i64,
    pub url: String,
    #[sqlx(rename = "check_interval")]
    pub interval: Option<u32>,
    pub regexp_pattern: Option<String>,
}

impl SiteConfig {
    /// Returns the check interval when monitoring is enabled for this site.
    pub fn active_interval(&self) -> Option<u32> {
        self.interval.filter(|secs| *secs > 0)
    }
}

/// Site data accepted by the store before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSite {
    pub url: String,
    pub interval: Option<u32>,
    pub regexp_pattern: Option<String>,
}
