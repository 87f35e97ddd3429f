//! Post repository.

use std::sync::Arc;

use crate::entities::{Comment, Media, Post, comment, media, post};
use crate::views::PostView;
use picshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use tracing::debug;

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::PostNotFound(id))
    }

    /// Get all posts owned by a user.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<post::Model>> {
        Post::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a post.
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a post along with its comments and media.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = Post::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        debug!(post_id = id, rows = result.rows_affected, "Deleted post");
        Ok(())
    }

    /// Load a post together with its comments and media and build the serialized view.
    pub async fn load_view(&self, id: i32) -> AppResult<PostView> {
        let post = self.get_by_id(id).await?;

        let comments = post
            .find_related(Comment)
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let media = post
            .find_related(Media)
            .order_by_asc(media::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(PostView::from_parts(&post, &comments, &media))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::MediaType;
    use sea_orm::{DatabaseBackend, MockDatabase, Set};

    fn create_test_post(id: i32, user_id: i32, caption: Option<&str>) -> post::Model {
        post::Model {
            id,
            user_id,
            caption: caption.map(ToString::to_string),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        assert!(matches!(
            repo.get_by_id(5).await,
            Err(AppError::PostNotFound(5))
        ));
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let posts = vec![
            create_test_post(1, 10, Some("first")),
            create_test_post(2, 10, None),
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([posts])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.find_by_user(10).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].caption.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_create_post() {
        let post = create_test_post(3, 10, Some("hello"));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let model = post::ActiveModel {
            user_id: Set(10),
            caption: Set(Some("hello".to_string())),
            location: Set(None),
            ..Default::default()
        };

        assert_eq!(repo.create(model).await.unwrap(), post);
    }

    #[tokio::test]
    async fn test_load_view() {
        let post = create_test_post(3, 10, Some("beach"));
        let comments = vec![comment::Model {
            id: 1,
            comment_text: "great shot".to_string(),
            author_id: 11,
            post_id: 3,
        }];
        let media = vec![
            media::Model {
                id: 1,
                kind: MediaType::Image,
                url: "https://cdn.example/1.jpg".to_string(),
                post_id: 3,
            },
            media::Model {
                id: 2,
                kind: MediaType::Image,
                url: "https://cdn.example/2.jpg".to_string(),
                post_id: 3,
            },
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .append_query_results([comments])
                .append_query_results([media])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let view = repo.load_view(3).await.unwrap();

        assert_eq!(view.comments_count, 1);
        assert_eq!(
            view.media_urls,
            vec![
                "https://cdn.example/1.jpg".to_string(),
                "https://cdn.example/2.jpg".to_string()
            ]
        );
    }
}
