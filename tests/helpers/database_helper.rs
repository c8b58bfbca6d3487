//! Test database helper utilities
//!
//! PostgreSQL tests run only when `TEST_DATABASE_URL` points at a database the
//! tests may truncate. Without it they return early.

use sqlx::PgPool;
use std::sync::Arc;
use DealerDesk::config::Settings;
use DealerDesk::database::{create_pool, run_migrations, PgStore};
use DealerDesk::DatabaseService;

const TABLES: &str =
    "cars, settings, leads, reviews, stories, pages, contact_forms, banks, leasing_companies";

pub struct TestDatabase {
    pub pool: PgPool,
    pub database_url: String,
}

impl TestDatabase {
    /// Connect, migrate and empty every table, or `None` when no database is configured
    pub async fn from_env() -> Option<Self> {
        let database_url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => {
                eprintln!("TEST_DATABASE_URL not set, skipping PostgreSQL test");
                return None;
            }
        };

        let mut config = Settings::default().database;
        config.url = database_url.clone();
        config.max_connections = 5;
        config.acquire_timeout_seconds = 5;
        let pool = create_pool(&config).await.expect("connect to test database");
        run_migrations(&pool).await.expect("run migrations");

        let database = Self { pool, database_url };
        database.cleanup().await;
        Some(database)
    }

    pub async fn cleanup(&self) {
        sqlx::query(&format!("TRUNCATE {}", TABLES))
            .execute(&self.pool)
            .await
            .expect("truncate test tables");
    }

    pub fn store(&self) -> PgStore {
        PgStore::new(self.pool.clone())
    }

    pub fn service(&self) -> DatabaseService {
        DatabaseService::new(Arc::new(self.store()))
    }
}
