use async_trait::async_trait;
use sqlx::{MySql, Pool, QueryBuilder};

use crate::modules::monitor::{interface::ResultSink, model::MonitoringResult};
use crate::modules::StoreError;

pub struct MonitoringCrud {
    pool: Pool<MySql>,
}

impl MonitoringCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultSink for MonitoringCrud {
    async fn insert_batch(&self, results: &[MonitoringResult]) -> Result<(), StoreError> {
        if results.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "INSERT INTO website_monitoring (request_timestamp, response_timestamp, response_time, \
             http_status_code, url, website_id, is_regex_pattern_compliant) ",
        );

        builder.push_values(results, |mut row, result| {
            row.push_bind(result.request_timestamp)
                .push_bind(result.response_timestamp)
                .push_bind(result.response_time)
                .push_bind(result.http_status_code)
                .push_bind(&result.url)
                .push_bind(result.website_id)
                .push_bind(result.is_regex_pattern_compliant);
        });

        builder.build().execute(&self.pool).await?;

        Ok(())
    }
}
