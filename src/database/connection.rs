//! Postgres pool setup for the store

use std::time::Duration;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;
use crate::config::DatabaseConfig;
use crate::utils::errors::Result;

pub type DatabasePool = Pool<Postgres>;

/// Pool options for `config`; a zero idle or lifetime limit disables it
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    let limit = |seconds: u64| (seconds > 0).then(|| Duration::from_secs(seconds));

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(limit(config.idle_timeout_seconds))
        .max_lifetime(limit(config.max_lifetime_seconds))
}

/// Open the pool and make sure the server answers
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool> {
    let pool = pool_options(config).connect(&config.url).await?;
    health_check(&pool).await?;

    info!(
        max_connections = config.max_connections,
        acquire_timeout_seconds = config.acquire_timeout_seconds,
        "Database pool ready"
    );
    Ok(pool)
}

/// Apply the bundled schema migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

pub async fn health_check(pool: &DatabasePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_pool_options_follow_settings() {
        let mut database = Settings::default().database;
        database.max_connections = 3;
        database.acquire_timeout_seconds = 5;

        let options = pool_options(&database);
        assert_eq!(options.get_max_connections(), 3);
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(5));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(600)));
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(1800)));
    }

    #[test]
    fn test_zero_limits_disable_recycling() {
        let mut database = Settings::default().database;
        database.idle_timeout_seconds = 0;
        database.max_lifetime_seconds = 0;

        let options = pool_options(&database);
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), None);
    }
}
