//! Listing repository implementation

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use super::collection::{newest_first, Collection};
use crate::database::store::{Store, Table};
use crate::models::listing::{CreateListingRequest, Listing, ListingDraft, UpdateListingRequest};
use crate::utils::errors::{DealerDeskError, Result};

#[derive(Debug, Clone)]
pub struct ListingRepository {
    cars: Collection<Listing>,
}

impl ListingRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            cars: Collection::new(store, Table::Cars),
        }
    }

    /// All listings, newest first
    pub async fn get_all(&self) -> Result<Vec<Listing>> {
        self.cars.list(&newest_first()).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Listing>> {
        self.cars.find_by_id(id).await
    }

    /// Create a listing; blank image URLs are dropped before the write
    pub async fn create(&self, request: CreateListingRequest) -> Result<Listing> {
        let request = request.normalize()?;
        debug!(make = %request.make, model = %request.model, images = request.image_urls.len(), "Creating listing");
        self.cars.insert(&request).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateListingRequest) -> Result<Listing> {
        let request = request.normalize()?;
        debug!(listing_id = %id, "Updating listing");
        self.cars.update(id, &request).await
    }

    /// Overwrite every editable column of listing `id` with the saved form
    ///
    /// Optional fields left empty are written as null.
    pub async fn replace(&self, id: Uuid, request: CreateListingRequest) -> Result<Listing> {
        let request = request.normalize()?;
        debug!(listing_id = %id, images = request.image_urls.len(), "Replacing listing");
        self.cars.update(id, &request).await
    }

    /// Delete the listing row only; leads and uploaded images are left alone
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.cars.delete(id).await
    }

    /// Edit-form state of an existing listing
    pub async fn edit_draft(&self, id: Uuid) -> Result<ListingDraft> {
        let listing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DealerDeskError::NotFound { resource: "listing", id: id.to_string() })?;
        Ok(ListingDraft::from(&listing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use assert_matches::assert_matches;
    use std::collections::BTreeMap;

    fn request(make: &str, image_urls: &[&str]) -> CreateListingRequest {
        CreateListingRequest {
            make: make.to_string(),
            model: "Model".to_string(),
            year: 2018,
            price: 12000.0,
            mileage: Some(90000),
            engine_volume: Some("2.0".to_string()),
            fuel_type: None,
            transmission: None,
            drive_train: None,
            body_type: None,
            color: None,
            description: None,
            image_urls: image_urls.iter().map(|s| s.to_string()).collect(),
            is_available: true,
            specifications: BTreeMap::from([("Мощность".to_string(), "190 hp".to_string())]),
            features: vec!["Heated seats".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_compacts_images_and_assigns_id() {
        let repo = ListingRepository::new(Arc::new(MemoryStore::new()));
        let listing = repo.create(request("Skoda", &["a.jpg", " ", "b.jpg"])).await.unwrap();
        assert_eq!(listing.image_urls, vec!["a.jpg", "b.jpg"]);
        assert_eq!(listing.specifications["Мощность"], "190 hp");

        let fetched = repo.get_by_id(listing.id).await.unwrap();
        assert_eq!(fetched, Some(listing));
    }

    #[tokio::test]
    async fn test_get_all_newest_first() {
        let repo = ListingRepository::new(Arc::new(MemoryStore::new()));
        repo.create(request("Older", &[])).await.unwrap();
        repo.create(request("Newer", &[])).await.unwrap();

        let makes: Vec<_> = repo.get_all().await.unwrap().into_iter().map(|l| l.make).collect();
        assert_eq!(makes, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_update_merges_and_stamps() {
        let repo = ListingRepository::new(Arc::new(MemoryStore::new()));
        let listing = repo.create(request("VW", &["a.jpg"])).await.unwrap();

        let updated = repo
            .update(listing.id, UpdateListingRequest { price: Some(9999.0), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.price, 9999.0);
        assert_eq!(updated.make, "VW");
        assert_eq!(updated.image_urls, vec!["a.jpg"]);
        assert!(updated.updated_at >= listing.updated_at);
        assert_eq!(updated.created_at, listing.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_store_error() {
        let repo = ListingRepository::new(Arc::new(MemoryStore::new()));
        let err = repo
            .update(Uuid::new_v4(), UpdateListingRequest { price: Some(1.0), ..Default::default() })
            .await
            .unwrap_err();
        assert_matches!(err, DealerDeskError::Store(ref e) if e.is_no_rows());
    }

    #[tokio::test]
    async fn test_edit_draft_restores_placeholder() {
        let repo = ListingRepository::new(Arc::new(MemoryStore::new()));
        let listing = repo.create(request("Kia", &[""])).await.unwrap();
        assert!(listing.image_urls.is_empty());

        let draft = repo.edit_draft(listing.id).await.unwrap();
        assert_eq!(draft.image_urls, vec![String::new()]);
        assert_eq!(draft.price, "12000");

        let missing = repo.edit_draft(Uuid::new_v4()).await.unwrap_err();
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_store() {
        let store = MemoryStore::new();
        let repo = ListingRepository::new(Arc::new(store.clone()));
        let err = repo.create(request("", &[])).await.unwrap_err();
        assert_matches!(err, DealerDeskError::Validation(_));
        assert_eq!(store.count(Table::Cars).await, 0);
    }
}
