use async_trait::async_trait;

use super::model::{NewSite, SiteConfig};
use crate::modules::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Configuration store holding the registered sites.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn list_sites(&self) -> Result<Vec<SiteConfig>>;
    async fn get_site(&self, url: &str) -> Result<Option<SiteConfig>>;
    async fn create_site(&self, site: &NewSite) -> Result<SiteConfig>;
    async fn update_site(&self, site: &SiteConfig) -> Result<()>;
}
