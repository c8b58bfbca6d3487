//! Contact page content model
//!
//! Stored as the `content` JSON of the `pages` row whose `page_type` is `contacts`.
//! JSON keys are camelCase to match what the public site reads.

use serde::{Deserialize, Serialize};

pub const CONTACTS_PAGE_TYPE: &str = "contacts";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    pub title: String,
    pub subtitle: String,
    pub address: String,
    pub address_note: String,
    pub phone: String,
    pub phone_note: String,
    pub email: String,
    pub email_note: String,
    pub working_hours: WorkingHours,
    #[serde(default)]
    pub social_media: SocialMedia,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub weekdays: String,
    pub weekends: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<SocialLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<SocialLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avby: Option<SocialLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}
