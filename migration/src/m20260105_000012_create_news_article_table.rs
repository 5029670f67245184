use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsArticle::Table)
                    .if_not_exists()
                    .col(pk_auto(NewsArticle::Id))
                    .col(integer(NewsArticle::AuthorId))
                    .col(string(NewsArticle::Title))
                    .col(string_null(NewsArticle::Summary))
                    .col(text(NewsArticle::Content))
                    .col(boolean(NewsArticle::IsPublished).default(false))
                    .col(timestamp_with_time_zone_null(NewsArticle::PublishedAt))
                    .col(boolean(NewsArticle::IsDeleted).default(false))
                    .col(
                        timestamp_with_time_zone(NewsArticle::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(NewsArticle::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_article_author_id")
                            .from(NewsArticle::Table, NewsArticle::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewsArticle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum NewsArticle {
    Table,
    Id,
    AuthorId,
    Title,
    Summary,
    Content,
    IsPublished,
    PublishedAt,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}
