//! Lead and contact form repository implementations

use std::sync::Arc;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;
use super::collection::{newest_first, Collection};
use crate::database::store::{Store, Table};
use crate::models::lead::{
    ContactForm, ContactFormStatus, CreateContactFormRequest, CreateLeadRequest, Lead, LeadStatus,
};
use crate::utils::errors::Result;

/// Payload written for a new lead; the status is always `new`
#[derive(Debug, Serialize)]
struct NewLead<'a> {
    name: &'a str,
    phone: &'a str,
    email: Option<&'a str>,
    message: Option<&'a str>,
    car_id: Option<Uuid>,
    status: LeadStatus,
}

#[derive(Debug, Serialize)]
struct NewContactForm<'a> {
    name: &'a str,
    phone: &'a str,
    message: &'a str,
    status: ContactFormStatus,
}

#[derive(Debug, Serialize)]
struct StatusPatch<S> {
    status: S,
}

#[derive(Debug, Clone)]
pub struct LeadRepository {
    leads: Collection<Lead>,
}

impl LeadRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            leads: Collection::new(store, Table::Leads),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Lead>> {
        self.leads.list(&newest_first()).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Lead>> {
        self.leads.find_by_id(id).await
    }

    /// Record a lead; any status supplied by the caller is ignored
    pub async fn create(&self, request: CreateLeadRequest) -> Result<Lead> {
        request.validate()?;
        if let Some(status) = request.status.filter(|s| *s != LeadStatus::New) {
            debug!(requested = %status, "Ignoring caller-supplied lead status");
        }

        let lead = self
            .leads
            .insert(&NewLead {
                name: &request.name,
                phone: &request.phone,
                email: request.email.as_deref(),
                message: request.message.as_deref(),
                car_id: request.car_id,
                status: LeadStatus::New,
            })
            .await?;

        info!(lead_id = %lead.id, car_id = ?lead.car_id, "Lead recorded");
        Ok(lead)
    }

    pub async fn update_status(&self, id: Uuid, status: LeadStatus) -> Result<Lead> {
        debug!(lead_id = %id, status = %status, "Updating lead status");
        self.leads.update(id, &StatusPatch { status }).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.leads.delete(id).await
    }
}

#[derive(Debug, Clone)]
pub struct ContactFormRepository {
    forms: Collection<ContactForm>,
}

impl ContactFormRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            forms: Collection::new(store, Table::ContactForms),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<ContactForm>> {
        self.forms.list(&newest_first()).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ContactForm>> {
        self.forms.find_by_id(id).await
    }

    /// Record a contact form submission with status `new`
    pub async fn create(&self, request: CreateContactFormRequest) -> Result<ContactForm> {
        request.validate()?;
        self.forms
            .insert(&NewContactForm {
                name: &request.name,
                phone: &request.phone,
                message: &request.message,
                status: ContactFormStatus::New,
            })
            .await
    }

    pub async fn update_status(&self, id: Uuid, status: ContactFormStatus) -> Result<ContactForm> {
        debug!(form_id = %id, status = %status, "Updating contact form status");
        self.forms.update(id, &StatusPatch { status }).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.forms.delete(id).await
    }
}
