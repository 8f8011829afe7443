use sea_orm_migration::prelude::*;

use crate::m20240601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPosts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BlogPosts::UserId).uuid().not_null())
                    .col(ColumnDef::new(BlogPosts::Title).string().not_null())
                    .col(ColumnDef::new(BlogPosts::Content).text().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::Topic)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::TargetAudience)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::Tone)
                            .string_len(32)
                            .not_null()
                            .default("professional"),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::WordCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::SeoKeywords)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_posts_user_id")
                            .from(BlogPosts::Table, BlogPosts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Dashboard listing: one owner's posts, newest first.
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_user_created")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::UserId)
                    .col(BlogPosts::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    UserId,
    Title,
    Content,
    Status,
    Topic,
    TargetAudience,
    Tone,
    WordCount,
    SeoKeywords,
    CreatedAt,
    UpdatedAt,
}
