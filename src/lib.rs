//! DealerDesk
//!
//! Data-access layer of a car dealership's admin panel. This library provides
//! typed access to vehicle listings, site copy, reviews and stories, leads,
//! contact details and financing partners, plus image uploads to object
//! storage and cache invalidation for the public site.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{DealerDeskError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use handlers::{AdminContext, Notice};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
