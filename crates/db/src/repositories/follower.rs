//! Follower repository.

use std::sync::Arc;

use crate::entities::{Follower, follower};
use picshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::debug;

/// Follower repository for database operations.
#[derive(Clone)]
pub struct FollowerRepository {
    db: Arc<DatabaseConnection>,
}

impl FollowerRepository {
    /// Create a new follower repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the edge "`user_from_id` follows `user_to_id`".
    pub async fn find_pair(
        &self,
        user_from_id: i32,
        user_to_id: i32,
    ) -> AppResult<Option<follower::Model>> {
        Follower::find_by_id((user_from_id, user_to_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user is following another user.
    pub async fn is_following(&self, user_from_id: i32, user_to_id: i32) -> AppResult<bool> {
        Ok(self.find_pair(user_from_id, user_to_id).await?.is_some())
    }

    /// Record that `user_from_id` follows `user_to_id`.
    ///
    /// Self-follows and duplicate edges are rejected before touching the
    /// table; the schema enforces the same rules.
    pub async fn follow(&self, user_from_id: i32, user_to_id: i32) -> AppResult<follower::Model> {
        if user_from_id == user_to_id {
            return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
        }

        if self.is_following(user_from_id, user_to_id).await? {
            return Err(AppError::Conflict("Already following".to_string()));
        }

        let edge = self
            .create(follower::ActiveModel {
                user_from_id: Set(user_from_id),
                user_to_id: Set(user_to_id),
            })
            .await?;

        debug!(user_from_id, user_to_id, "Created follow edge");
        Ok(edge)
    }

    /// Insert a follow edge as given.
    ///
    /// An edge that already exists, including one inserted concurrently after
    /// the check in [`Self::follow`], is reported as `Conflict`.
    pub async fn create(&self, model: follower::ActiveModel) -> AppResult<follower::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("Already following".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Remove a follow edge. Returns whether an edge existed.
    pub async fn unfollow(&self, user_from_id: i32, user_to_id: i32) -> AppResult<bool> {
        let result = Follower::delete_by_id((user_from_id, user_to_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        debug!(
            user_from_id,
            user_to_id,
            rows = result.rows_affected,
            "Removed follow edge"
        );
        Ok(result.rows_affected > 0)
    }

    /// Edges pointing at a user (their followers).
    pub async fn find_followers(&self, user_id: i32) -> AppResult<Vec<follower::Model>> {
        Follower::find()
            .filter(follower::Column::UserToId.eq(user_id))
            .order_by_asc(follower::Column::UserFromId)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Edges originating from a user (who they follow).
    pub async fn find_following(&self, user_id: i32) -> AppResult<Vec<follower::Model>> {
        Follower::find()
            .filter(follower::Column::UserFromId.eq(user_id))
            .order_by_asc(follower::Column::UserToId)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count followers of a user.
    pub async fn count_followers(&self, user_id: i32) -> AppResult<u64> {
        Follower::find()
            .filter(follower::Column::UserToId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count users a user is following.
    pub async fn count_following(&self, user_id: i32) -> AppResult<u64> {
        Follower::find()
            .filter(follower::Column::UserFromId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn edge(from: i32, to: i32) -> follower::Model {
        follower::Model {
            user_from_id: from,
            user_to_id: to,
        }
    }

    #[tokio::test]
    async fn test_find_pair_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[edge(1, 2)]])
                .into_connection(),
        );

        let repo = FollowerRepository::new(db);
        let found = repo.find_pair(1, 2).await.unwrap().unwrap();

        assert_eq!(found.user_from_id, 1);
        assert_eq!(found.user_to_id, 2);
    }

    #[tokio::test]
    async fn test_is_following_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<follower::Model>::new()])
                .into_connection(),
        );

        let repo = FollowerRepository::new(db);
        assert!(!repo.is_following(1, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_follow_creates_edge() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<follower::Model>::new()])
                .append_query_results([[edge(1, 2)]])
                .into_connection(),
        );

        let repo = FollowerRepository::new(db);
        let created = repo.follow(1, 2).await.unwrap();

        assert_eq!(created, edge(1, 2));
    }

    #[tokio::test]
    async fn test_follow_self_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = FollowerRepository::new(db);
        let result = repo.follow(7, 7).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_follow_duplicate_rejected() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[edge(1, 2)]])
                .into_connection(),
        );

        let repo = FollowerRepository::new(db);
        let result = repo.follow(1, 2).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_unfollow_reports_missing_edge() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 0,
                    },
                ])
                .into_connection(),
        );

        let repo = FollowerRepository::new(db);
        assert!(repo.unfollow(1, 2).await.unwrap());
        assert!(!repo.unfollow(1, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_followers() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![edge(2, 1), edge(3, 1)]])
                .into_connection(),
        );

        let repo = FollowerRepository::new(db);
        let followers = repo.find_followers(1).await.unwrap();

        assert_eq!(followers.len(), 2);
        assert!(followers.iter().all(|f| f.user_to_id == 1));
    }

    #[tokio::test]
    async fn test_count_followers() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(4))
                }]])
                .into_connection(),
        );

        let repo = FollowerRepository::new(db);
        assert_eq!(repo.count_followers(1).await.unwrap(), 4);
    }
}
