//! Media repository.

use std::sync::Arc;

use crate::entities::{Media, media};
use picshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Media repository for database operations.
#[derive(Clone)]
pub struct MediaRepository {
    db: Arc<DatabaseConnection>,
}

impl MediaRepository {
    /// Create a new media repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a media attachment by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<media::Model>> {
        Media::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all media attached to a post.
    pub async fn find_by_post(&self, post_id: i32) -> AppResult<Vec<media::Model>> {
        Media::find()
            .filter(media::Column::PostId.eq(post_id))
            .order_by_asc(media::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Attach media to a post.
    pub async fn create(&self, model: media::ActiveModel) -> AppResult<media::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a media attachment.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        Media::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
