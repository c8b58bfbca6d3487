//! Database module
//!
//! This module handles the store boundary, its Postgres and in-memory
//! implementations, and the entity repositories on top of them.

pub mod store;
pub mod connection;
pub mod postgres;
pub mod memory;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use store::{Query, Row, Store, Table};
pub use connection::{DatabasePool, pool_options, create_pool, run_migrations, health_check};
pub use postgres::PgStore;
pub use memory::MemoryStore;
pub use repositories::{
    BankRepository, ContactFormRepository, ContactRepository, LeadRepository, LeasingRepository,
    ListingRepository, ReviewRepository, SettingsRepository, StoryRepository,
};
pub use service::DatabaseService;
