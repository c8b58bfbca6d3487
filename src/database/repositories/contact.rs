//! Contact page repository
//!
//! The contact page is a singleton: the `pages` row with `page_type = contacts`.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;
use super::collection::Collection;
use crate::database::store::{Query, Store, Table};
use crate::models::contact::{ContactData, CONTACTS_PAGE_TYPE};
use crate::utils::errors::Result;

#[derive(Debug, Clone, Deserialize)]
struct Page {
    id: Uuid,
    content: Value,
}

#[derive(Debug, Serialize)]
struct PageWrite<'a> {
    page_type: &'a str,
    content: &'a ContactData,
}

#[derive(Debug, Clone)]
pub struct ContactRepository {
    pages: Collection<Page>,
}

impl ContactRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            pages: Collection::new(store, Table::Pages),
        }
    }

    /// Current contact page content, `None` when it was never saved
    pub async fn get(&self) -> Result<Option<ContactData>> {
        let Some(page) = self.pages.find(&Query::new().eq("page_type", CONTACTS_PAGE_TYPE)).await? else {
            return Ok(None);
        };

        match serde_json::from_value(page.content) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                warn!(page_id = %page.id, error = %e, "Stored contact page does not match the expected shape");
                Ok(None)
            }
        }
    }

    /// Replace the contact page content, creating the row on first save
    pub async fn set(&self, data: &ContactData) -> Result<()> {
        debug!("Saving contact page");
        self.pages
            .upsert(
                "page_type",
                &PageWrite {
                    page_type: CONTACTS_PAGE_TYPE,
                    content: data,
                },
            )
            .await?;
        Ok(())
    }
}
