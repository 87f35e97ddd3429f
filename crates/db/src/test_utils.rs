//! Test utilities for database operations.
//!
//! Provides a ready-to-use database with the picshare schema applied.
//! By default this is a private in-memory `SQLite` database; set
//! `TEST_DATABASE_URL` to run against another server instead.

use picshare_common::DatabaseConfig;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing::info;

use crate::migrations::Migrator;

/// Tables in the order they can be emptied without violating foreign keys.
const TABLES_CHILD_FIRST: [&str; 5] = ["comment", "media", "post", "follower", "user"];

/// Test database configuration.
#[derive(Debug, Clone)]
pub struct TestDbConfig {
    /// Database URL.
    pub url: String,
}

impl Default for TestDbConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string()),
        }
    }
}

impl TestDbConfig {
    /// Whether this points at a private in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        crate::is_in_memory(&self.url)
    }

    /// Connection settings for this database.
    ///
    /// An in-memory `SQLite` database lives and dies with its connection, so
    /// the pool is pinned to exactly one.
    #[must_use]
    pub fn database_config(&self) -> DatabaseConfig {
        let pool = if self.is_in_memory() { 1 } else { 5 };
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: pool,
            min_connections: 1,
        }
    }
}

/// A test database with the schema applied.
pub struct TestDatabase {
    /// Database connection.
    pub conn: Arc<DatabaseConnection>,
    /// Database configuration.
    pub config: TestDbConfig,
}

impl TestDatabase {
    /// Connect using the default configuration and create the schema.
    pub async fn new() -> Result<Self, DbErr> {
        Self::with_config(TestDbConfig::default()).await
    }

    /// Connect using a custom configuration and create the schema.
    pub async fn with_config(config: TestDbConfig) -> Result<Self, DbErr> {
        let conn = crate::init(&config.database_config())
            .await
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        Migrator::up(&conn, None).await?;

        info!(in_memory = config.is_in_memory(), "Prepared test database");

        Ok(Self {
            conn: Arc::new(conn),
            config,
        })
    }

    /// Get the database connection.
    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        self.conn.as_ref()
    }

    /// Get a shared handle for constructing repositories.
    #[must_use]
    pub fn shared(&self) -> Arc<DatabaseConnection> {
        self.conn.clone()
    }

    /// Count rows in a table.
    pub async fn count_rows(&self, table: &str) -> Result<i64, DbErr> {
        let backend = self.conn.get_database_backend();
        let row = self
            .conn
            .query_one(Statement::from_string(
                backend,
                format!("SELECT COUNT(*) AS n FROM \"{table}\""),
            ))
            .await?
            .ok_or_else(|| DbErr::Custom(format!("no count returned for {table}")))?;

        row.try_get::<i64>("", "n")
    }

    /// Remove all rows from every picshare table.
    pub async fn cleanup(&self) -> Result<(), DbErr> {
        let backend = self.conn.get_database_backend();
        for table in TABLES_CHILD_FIRST {
            self.conn
                .execute(Statement::from_string(
                    backend,
                    format!("DELETE FROM \"{table}\""),
                ))
                .await?;
        }

        info!("Cleaned up test database");
        Ok(())
    }
}
