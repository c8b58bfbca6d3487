//! Vehicle listing handlers

use tracing::debug;
use uuid::Uuid;
use super::{conclude, notice, rejected, AdminContext, Notice};
use crate::models::listing::{Listing, ListingDraft};
use crate::services::{ImageFile, Invalidation};
use crate::utils::errors::DealerDeskError;

const COLLECTION: &str = "cars";
const IMAGE_FOLDER: &str = "cars";

pub async fn load_listings(ctx: &AdminContext) -> Result<Vec<Listing>, Notice> {
    conclude(
        "load",
        "listing",
        None,
        ctx.db.listings.get_all().await,
        "Ошибка загрузки автомобилей",
    )
}

/// Draft for the edit form of an existing listing
pub async fn edit_listing(ctx: &AdminContext, id: Uuid) -> Result<ListingDraft, Notice> {
    let id_text = id.to_string();
    conclude(
        "edit",
        "listing",
        Some(&id_text),
        ctx.db.listings.edit_draft(id).await,
        "Автомобиль не найден",
    )
}

/// Create a listing, or update `editing` when set
///
/// Numeric text is parsed first; a parse failure returns `Notice::Invalid`
/// without touching the store.
pub async fn save_listing(ctx: &AdminContext, editing: Option<Uuid>, draft: ListingDraft) -> Notice {
    let request = match draft.into_request() {
        Ok(request) => request,
        Err(e) => return rejected("save", "listing", e),
    };

    let outcome = match editing {
        Some(id) => ctx
            .db
            .listings
            .replace(id, request)
            .await
            .map(|listing| Invalidation::updated(COLLECTION, listing.id)),
        None => ctx
            .db
            .listings
            .create(request)
            .await
            .map(|listing| Invalidation::created(COLLECTION, listing.id)),
    };

    let id_text = editing.map(|id| id.to_string());
    let result = conclude("save", "listing", id_text.as_deref(), outcome, "Ошибка сохранения автомобиля");
    if let Ok(invalidation) = &result {
        ctx.invalidate(invalidation.clone());
    }
    notice(result, "Автомобиль сохранен")
}

/// Delete the listing row; its images stay in the bucket
pub async fn delete_listing(ctx: &AdminContext, id: Uuid) -> Notice {
    let id_text = id.to_string();
    let result = conclude(
        "delete",
        "listing",
        Some(&id_text),
        ctx.db.listings.delete(id).await,
        "Ошибка удаления автомобиля",
    );
    if result.is_ok() {
        ctx.invalidate(Invalidation::deleted(COLLECTION, id));
    }
    notice(result, "Автомобиль удален")
}

/// Upload images and put their URLs into the draft's image slots
///
/// Empty placeholder slots are filled first; the rest are appended. On failure
/// the draft is left unchanged.
pub async fn upload_listing_images(ctx: &AdminContext, draft: &mut ListingDraft, files: &[ImageFile]) -> Notice {
    if files.is_empty() {
        return Notice::Invalid("Не выбраны файлы".to_string());
    }

    let outcome = ctx
        .services
        .images
        .upload_images(files, Some(IMAGE_FOLDER))
        .await
        .map_err(DealerDeskError::from);
    let result = conclude("upload", "listing image", None, outcome, "Ошибка загрузки изображений");

    if let Ok(urls) = &result {
        let mut urls = urls.iter().cloned();
        for slot in draft.image_urls.iter_mut().filter(|slot| slot.trim().is_empty()) {
            match urls.next() {
                Some(url) => *slot = url,
                None => break,
            }
        }
        draft.image_urls.extend(urls);
        debug!(slots = draft.image_urls.len(), "Draft image slots updated");
    }
    notice(result, "Изображения загружены")
}

/// Remove an uploaded image from the bucket and from the draft
pub async fn remove_listing_image(ctx: &AdminContext, draft: &mut ListingDraft, index: usize) -> Notice {
    let Some(url) = draft.image_urls.get(index).cloned() else {
        return Notice::Invalid("Изображение не найдено".to_string());
    };

    if !url.trim().is_empty() {
        let outcome = ctx.services.images.delete_image(&url).await.map_err(DealerDeskError::from);
        if let Err(notice) = conclude("remove", "listing image", Some(&url), outcome, "Ошибка удаления изображения") {
            return notice;
        }
    }

    draft.remove_image_slot(index);
    Notice::Success("Изображение удалено".to_string())
}
