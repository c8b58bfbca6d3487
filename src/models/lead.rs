//! Lead and contact form submission models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::validation::require_text;
use crate::utils::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    pub car_id: Option<Uuid>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Incoming lead
///
/// `status` is accepted for wire compatibility but ignored: every new lead starts as `new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLeadRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    pub car_id: Option<Uuid>,
    #[serde(default)]
    pub status: Option<LeadStatus>,
}

impl CreateLeadRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("phone", &self.phone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub message: String,
    pub status: ContactFormStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContactFormRequest {
    pub name: String,
    pub phone: String,
    pub message: String,
    #[serde(default)]
    pub status: Option<ContactFormStatus>,
}

impl CreateContactFormRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("phone", &self.phone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactFormStatus {
    New,
    Read,
    Responded,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadStatus::New => write!(f, "new"),
            LeadStatus::Contacted => write!(f, "contacted"),
            LeadStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::fmt::Display for ContactFormStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactFormStatus::New => write!(f, "new"),
            ContactFormStatus::Read => write!(f, "read"),
            ContactFormStatus::Responded => write!(f, "responded"),
        }
    }
}
