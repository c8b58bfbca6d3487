//! Review and story repository implementations
//!
//! Both are moderated content: `is_published` defaults to `true` when the
//! creator does not say otherwise, and the public site only reads published rows.

use std::sync::Arc;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;
use super::collection::{newest_first, Collection};
use crate::database::store::{Store, Table};
use crate::models::review::{
    CreateReviewRequest, CreateStoryRequest, Review, Story, UpdateReviewRequest, UpdateStoryRequest,
};
use crate::utils::errors::Result;

#[derive(Debug, Serialize)]
struct NewReview<'a> {
    name: &'a str,
    content: &'a str,
    rating: i16,
    is_published: bool,
}

#[derive(Debug, Serialize)]
struct NewStory<'a> {
    title: &'a str,
    content: &'a str,
    image_url: Option<&'a str>,
    is_published: bool,
}

/// Edit-form write of a story; `image_url` is always written
#[derive(Debug, Serialize)]
struct StoryForm<'a> {
    title: &'a str,
    content: &'a str,
    image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_published: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ReviewRepository {
    reviews: Collection<Review>,
}

impl ReviewRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            reviews: Collection::new(store, Table::Reviews),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Review>> {
        self.reviews.list(&newest_first()).await
    }

    /// Published reviews, newest first
    pub async fn get_published(&self) -> Result<Vec<Review>> {
        self.reviews.list(&newest_first().eq("is_published", true)).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Review>> {
        self.reviews.find_by_id(id).await
    }

    pub async fn create(&self, request: CreateReviewRequest) -> Result<Review> {
        request.validate()?;
        let is_published = request.is_published.unwrap_or(true);
        debug!(rating = request.rating, is_published, "Creating review");

        self.reviews
            .insert(&NewReview {
                name: &request.name,
                content: &request.content,
                rating: request.rating,
                is_published,
            })
            .await
    }

    pub async fn update(&self, id: Uuid, request: UpdateReviewRequest) -> Result<Review> {
        request.validate()?;
        self.reviews.update(id, &request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.reviews.delete(id).await
    }
}

#[derive(Debug, Clone)]
pub struct StoryRepository {
    stories: Collection<Story>,
}

impl StoryRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            stories: Collection::new(store, Table::Stories),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Story>> {
        self.stories.list(&newest_first()).await
    }

    pub async fn get_published(&self) -> Result<Vec<Story>> {
        self.stories.list(&newest_first().eq("is_published", true)).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Story>> {
        self.stories.find_by_id(id).await
    }

    pub async fn create(&self, request: CreateStoryRequest) -> Result<Story> {
        request.validate()?;
        self.stories
            .insert(&NewStory {
                title: &request.title,
                content: &request.content,
                image_url: request.image_url.as_deref().filter(|url| !url.trim().is_empty()),
                is_published: request.is_published.unwrap_or(true),
            })
            .await
    }

    pub async fn update(&self, id: Uuid, request: UpdateStoryRequest) -> Result<Story> {
        request.validate()?;
        self.stories.update(id, &request).await
    }

    /// Save the edit form of story `id`; a blank image URL clears the cover
    pub async fn replace(&self, id: Uuid, request: CreateStoryRequest) -> Result<Story> {
        request.validate()?;
        debug!(story_id = %id, "Replacing story");
        self.stories
            .update(
                id,
                &StoryForm {
                    title: &request.title,
                    content: &request.content,
                    image_url: request.image_url.as_deref().filter(|url| !url.trim().is_empty()),
                    is_published: request.is_published,
                },
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.stories.delete(id).await
    }
}
