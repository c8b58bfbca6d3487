//! Database service layer
//!
//! This module bundles the entity repositories over one shared store

use std::sync::Arc;
use tracing::info;
use crate::config::DatabaseConfig;
use crate::database::connection::{create_pool, run_migrations};
use crate::database::memory::MemoryStore;
use crate::database::postgres::PgStore;
use crate::database::store::{Query, Store, Table};
use crate::database::repositories::*;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub listings: ListingRepository,
    pub settings: SettingsRepository,
    pub leads: LeadRepository,
    pub reviews: ReviewRepository,
    pub stories: StoryRepository,
    pub contacts: ContactRepository,
    pub contact_forms: ContactFormRepository,
    pub banks: BankRepository,
    pub leasing: LeasingRepository,
    store: Arc<dyn Store>,
}

impl DatabaseService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            listings: ListingRepository::new(store.clone()),
            settings: SettingsRepository::new(store.clone()),
            leads: LeadRepository::new(store.clone()),
            reviews: ReviewRepository::new(store.clone()),
            stories: StoryRepository::new(store.clone()),
            contacts: ContactRepository::new(store.clone()),
            contact_forms: ContactFormRepository::new(store.clone()),
            banks: BankRepository::new(store.clone()),
            leasing: LeasingRepository::new(store.clone()),
            store,
        }
    }

    /// Connect to Postgres and run migrations when configured to
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = create_pool(config).await?;
        if config.run_migrations {
            run_migrations(&pool).await?;
        }

        info!(max_connections = config.max_connections, "Database service ready");
        Ok(Self::new(Arc::new(PgStore::new(pool))))
    }

    /// Service over a fresh in-process store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Round-trip a trivial read through the store
    pub async fn health_check(&self) -> Result<()> {
        self.store.select(Table::Settings, &Query::new().eq("key", "__health")).await?;
        Ok(())
    }
}
