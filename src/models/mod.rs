//! Data models module
//!
//! This module contains the entities stored by the admin panel, their
//! write requests, and the normalization rules applied before writes.

pub mod listing;
pub mod setting;
pub mod lead;
pub mod review;
pub mod contact;
pub mod partner;
pub mod validation;

// Re-export commonly used models
pub use listing::{Listing, ListingDraft, CreateListingRequest, UpdateListingRequest};
pub use setting::{Setting, HomepageSettings, PageContent, StaticPages};
pub use lead::{Lead, LeadStatus, CreateLeadRequest, ContactForm, ContactFormStatus, CreateContactFormRequest};
pub use review::{Review, CreateReviewRequest, UpdateReviewRequest, Story, CreateStoryRequest, UpdateStoryRequest};
pub use contact::{ContactData, WorkingHours, SocialMedia, SocialLink};
pub use partner::{Bank, CreateBankRequest, UpdateBankRequest, LeasingCompany, CreateLeasingCompanyRequest, UpdateLeasingCompanyRequest};
