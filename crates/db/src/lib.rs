//! Database layer for picshare.
//!
//! Entities, schema creation, repositories and the serialized views of
//! users, posts, media, comments and follow edges.

pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod test_utils;
pub mod views;

use picshare_common::{AppError, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::log::LevelFilter;

/// Whether the URL names an in-memory `SQLite` database.
#[must_use]
pub fn is_in_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}

/// Build pool options for a database.
///
/// An in-memory `SQLite` database exists only while its connection is open,
/// so connections to one are never retired for idleness or age.
#[must_use]
pub fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(&config.url);

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    if !is_in_memory(&config.url) {
        opt.idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800));
    }

    opt
}

/// Initialize database connection.
pub async fn init(config: &DatabaseConfig) -> Result<DatabaseConnection, AppError> {
    Database::connect(connect_options(config))
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Create any tables that do not exist yet.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AppError> {
    use sea_orm_migration::MigratorTrait;
    migrations::Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}
