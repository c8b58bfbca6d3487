//! Review and story handlers

use uuid::Uuid;
use super::{conclude, notice, AdminContext, Notice};
use crate::models::review::{CreateReviewRequest, CreateStoryRequest, Review, Story, UpdateReviewRequest};
use crate::services::{ImageFile, Invalidation};
use crate::utils::errors::DealerDeskError;

const REVIEWS: &str = "reviews";
const STORIES: &str = "stories";
const STORY_IMAGE_FOLDER: &str = "stories";

pub async fn load_reviews(ctx: &AdminContext) -> Result<Vec<Review>, Notice> {
    conclude("load", "review", None, ctx.db.reviews.get_all().await, "Ошибка загрузки отзывов")
}

/// Create a review, or update `editing` when set
pub async fn save_review(ctx: &AdminContext, editing: Option<Uuid>, request: CreateReviewRequest) -> Notice {
    let outcome = match editing {
        Some(id) => ctx
            .db
            .reviews
            .update(id, UpdateReviewRequest::from(request))
            .await
            .map(|review| Invalidation::updated(REVIEWS, review.id)),
        None => ctx
            .db
            .reviews
            .create(request)
            .await
            .map(|review| Invalidation::created(REVIEWS, review.id)),
    };

    let id_text = editing.map(|id| id.to_string());
    let result = conclude("save", "review", id_text.as_deref(), outcome, "Ошибка сохранения отзыва");
    if let Ok(invalidation) = &result {
        ctx.invalidate(invalidation.clone());
    }
    notice(result, "Отзыв сохранен")
}

/// Publish or hide a review
pub async fn set_review_published(ctx: &AdminContext, id: Uuid, is_published: bool) -> Notice {
    let id_text = id.to_string();
    let request = UpdateReviewRequest {
        is_published: Some(is_published),
        ..Default::default()
    };
    let result = conclude(
        "publish",
        "review",
        Some(&id_text),
        ctx.db.reviews.update(id, request).await,
        "Ошибка сохранения отзыва",
    );
    if result.is_ok() {
        ctx.invalidate(Invalidation::updated(REVIEWS, id));
    }
    notice(result, if is_published { "Отзыв опубликован" } else { "Отзыв скрыт" })
}

pub async fn delete_review(ctx: &AdminContext, id: Uuid) -> Notice {
    let id_text = id.to_string();
    let result = conclude(
        "delete",
        "review",
        Some(&id_text),
        ctx.db.reviews.delete(id).await,
        "Ошибка удаления отзыва",
    );
    if result.is_ok() {
        ctx.invalidate(Invalidation::deleted(REVIEWS, id));
    }
    notice(result, "Отзыв удален")
}

pub async fn load_stories(ctx: &AdminContext) -> Result<Vec<Story>, Notice> {
    conclude("load", "story", None, ctx.db.stories.get_all().await, "Ошибка загрузки историй")
}

pub async fn save_story(ctx: &AdminContext, editing: Option<Uuid>, request: CreateStoryRequest) -> Notice {
    let outcome = match editing {
        Some(id) => ctx
            .db
            .stories
            .replace(id, request)
            .await
            .map(|story| Invalidation::updated(STORIES, story.id)),
        None => ctx
            .db
            .stories
            .create(request)
            .await
            .map(|story| Invalidation::created(STORIES, story.id)),
    };

    let id_text = editing.map(|id| id.to_string());
    let result = conclude("save", "story", id_text.as_deref(), outcome, "Ошибка сохранения истории");
    if let Ok(invalidation) = &result {
        ctx.invalidate(invalidation.clone());
    }
    notice(result, "История сохранена")
}

pub async fn delete_story(ctx: &AdminContext, id: Uuid) -> Notice {
    let id_text = id.to_string();
    let result = conclude(
        "delete",
        "story",
        Some(&id_text),
        ctx.db.stories.delete(id).await,
        "Ошибка удаления истории",
    );
    if result.is_ok() {
        ctx.invalidate(Invalidation::deleted(STORIES, id));
    }
    notice(result, "История удалена")
}

/// Upload a story cover image and return its public URL
pub async fn upload_story_image(ctx: &AdminContext, file: &ImageFile) -> Result<String, Notice> {
    let outcome = ctx
        .services
        .images
        .upload_image(file, Some(STORY_IMAGE_FOLDER))
        .await
        .map_err(DealerDeskError::from);
    conclude("upload", "story image", None, outcome, "Ошибка загрузки изображения")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i16) -> CreateReviewRequest {
        CreateReviewRequest {
            name: "Marina".to_string(),
            content: "Helped with the loan".to_string(),
            rating,
            is_published: None,
        }
    }

    #[tokio::test]
    async fn test_invalid_rating_is_rejected() {
        let ctx = AdminContext::in_memory();
        let notice = save_review(&ctx, None, review(9)).await;
        assert_eq!(notice, Notice::Invalid("rating must be between 1 and 5".to_string()));
        assert!(load_reviews(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_publish_toggle() {
        let ctx = AdminContext::in_memory();
        assert!(save_review(&ctx, None, review(5)).await.is_success());
        let created = load_reviews(&ctx).await.unwrap().remove(0);
        assert!(created.is_published);

        assert_eq!(set_review_published(&ctx, created.id, false).await, Notice::Success("Отзыв скрыт".to_string()));
        assert!(ctx.db.reviews.get_published().await.unwrap().is_empty());

        assert!(delete_review(&ctx, created.id).await.is_success());
        assert!(!delete_review(&ctx, created.id).await.is_success());
    }

    #[tokio::test]
    async fn test_story_with_uploaded_cover() {
        let ctx = AdminContext::in_memory();
        let url = upload_story_image(&ctx, &ImageFile::new("cover.png", "image/png", vec![7]))
            .await
            .unwrap();
        assert!(url.contains("/stories/"));

        let request = CreateStoryRequest {
            title: "First car".to_string(),
            content: "A Golf for a student".to_string(),
            image_url: Some(url.clone()),
            is_published: Some(false),
        };
        assert!(save_story(&ctx, None, request).await.is_success());

        let stories = load_stories(&ctx).await.unwrap();
        assert_eq!(stories[0].image_url.as_deref(), Some(url.as_str()));
        assert!(!stories[0].is_published);
    }
}
