//! Database migrations.
//!
//! Creates the five picshare tables in foreign-key dependency order.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20261019_000001_create_user_table;
mod m20261019_000002_create_follower_table;
mod m20261019_000003_create_post_table;
mod m20261019_000004_create_media_table;
mod m20261019_000005_create_comment_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_user_table::Migration),
            Box::new(m20261019_000002_create_follower_table::Migration),
            Box::new(m20261019_000003_create_post_table::Migration),
            Box::new(m20261019_000004_create_media_table::Migration),
            Box::new(m20261019_000005_create_comment_table::Migration),
        ]
    }
}
