//! Create media table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Media::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Media::Type).string_len(16).not_null())
                    .col(ColumnDef::new(Media::Url).string_len(250).not_null())
                    .col(ColumnDef::new(Media::PostId).integer().not_null())
                    // Closed domain, mirrors entities::MediaType
                    .check(Expr::col(Media::Type).is_in(["image", "video"]))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_post")
                            .from(Media::Table, Media::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_media_post_id")
                    .table(Media::Table)
                    .col(Media::PostId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Media {
    Table,
    Id,
    Type,
    Url,
    PostId,
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
}
