//! Comment repository.

use std::sync::Arc;

use crate::entities::{Comment, comment};
use picshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all comments on a post.
    pub async fn find_by_post(&self, post_id: i32) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all comments written by a user.
    pub async fn find_by_author(&self, author_id: i32) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::AuthorId.eq(author_id))
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count comments on a post.
    pub async fn count_by_post(&self, post_id: i32) -> AppResult<u64> {
        Comment::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new comment.
    pub async fn create(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a comment.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        Comment::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn create_test_comment(id: i32, author_id: i32, post_id: i32) -> comment::Model {
        comment::Model {
            id,
            comment_text: format!("comment {id}"),
            author_id,
            post_id,
        }
    }

    #[tokio::test]
    async fn test_find_by_author() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    create_test_comment(1, 5, 1),
                    create_test_comment(2, 5, 2),
                ]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.find_by_author(5).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.author_id == 5));
    }

    #[tokio::test]
    async fn test_count_by_post() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        assert_eq!(repo.count_by_post(1).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        assert!(repo.delete(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_surfaces_database_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_errors([DbErr::Custom("connection reset".to_string())])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.delete(1).await;
        assert!(matches!(result, Err(AppError::Database(ref m)) if m.contains("connection reset")));
    }
}
