use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Index name and columns; the listing filters always include `user_id`.
const INDEXES: &[(&str, &[Posts])] = &[
    ("idx_posts_user_id", &[Posts::UserId]),
    ("idx_posts_published", &[Posts::Published]),
    ("idx_posts_likes_count", &[Posts::LikesCount]),
    ("idx_posts_user_id_published", &[Posts::UserId, Posts::Published]),
    ("idx_posts_user_id_likes_count", &[Posts::UserId, Posts::LikesCount]),
    (
        "idx_posts_user_id_published_likes_count",
        &[Posts::UserId, Posts::Published, Posts::LikesCount],
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        tracing::info!("Creating table posts");

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Posts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Posts::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Posts::Content).string_len(500).not_null())
                    .col(ColumnDef::new(Posts::Published).boolean().not_null())
                    .col(
                        ColumnDef::new(Posts::LikesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Posts::UserId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_user_id")
                            .from(Posts::Table, Posts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, columns) in INDEXES {
            let mut index = Index::create();
            index.name(*name).table(Posts::Table).if_not_exists();
            for column in columns.iter().copied() {
                index.col(column);
            }
            manager.create_index(index.to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
pub enum Posts {
    Table,
    Id,
    Title,
    Content,
    Published,
    LikesCount,
    UserId,
}
