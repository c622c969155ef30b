use sqlx::{mysql::MySqlPoolOptions, MySql, Pool};

pub type DbPool = Pool<MySql>;

pub async fn init_db(database_url: &str) -> Result<DbPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trips a trivial query and logs the server version.
pub async fn check_db(pool: &DbPool) -> Result<String, sqlx::Error> {
    let (version,): (String,) = sqlx::query_as("SELECT VERSION()")
        .fetch_one(pool)
        .await?;

    tracing::info!("DB version = {}", version);
    Ok(version)
}
