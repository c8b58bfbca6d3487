//! Database repositories module
//!
//! One repository per entity family, all built on [`collection::Collection`]
//! over a shared [`Store`](crate::database::store::Store).

pub mod collection;
pub mod listing;
pub mod setting;
pub mod lead;
pub mod review;
pub mod contact;
pub mod partner;

// Re-export repositories
pub use listing::ListingRepository;
pub use setting::SettingsRepository;
pub use lead::{LeadRepository, ContactFormRepository};
pub use review::{ReviewRepository, StoryRepository};
pub use contact::ContactRepository;
pub use partner::{BankRepository, LeasingRepository};
