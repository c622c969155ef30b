use async_trait::async_trait;
use sqlx::{MySql, Pool};

use crate::modules::website::{
    interface::{Result, SiteRepository},
    model::{NewSite, SiteConfig},
};
use crate::modules::StoreError;

const SITE_COLUMNS: &str = "id, url, check_interval, regexp_pattern";

pub struct SiteCrud {
    pool: Pool<MySql>,
}

impl SiteCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteRepository for SiteCrud {
    async fn list_sites(&self) -> Result<Vec<SiteConfig>> {
        let sites = sqlx::query_as::<_, SiteConfig>(&format!(
            "SELECT {} FROM website_info ORDER BY id",
            SITE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sites)
    }

    async fn get_site(&self, url: &str) -> Result<Option<SiteConfig>> {
        let site = sqlx::query_as::<_, SiteConfig>(&format!(
            "SELECT {} FROM website_info WHERE url = ?",
            SITE_COLUMNS
        ))
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(site)
    }

    async fn create_site(&self, site: &NewSite) -> Result<SiteConfig> {
        let result = sqlx::query(
            r#"
            INSERT INTO website_info (url, check_interval, regexp_pattern)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&site.url)
        .bind(site.interval)
        .bind(&site.regexp_pattern)
        .execute(&self.pool)
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| StoreError::Unavailable("website id out of range".to_string()))?;

        Ok(SiteConfig {
            id,
            url: site.url.clone(),
            interval: site.interval,
            regexp_pattern: site.regexp_pattern.clone(),
        })
    }

    async fn update_site(&self, site: &SiteConfig) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE website_info
            SET check_interval = ?,
                regexp_pattern = ?,
                updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(site.interval)
        .bind(&site.regexp_pattern)
        .bind(site.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
