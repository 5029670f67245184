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
                    .table(Game::Table)
                    .if_not_exists()
                    .col(pk_auto(Game::Id))
                    .col(integer(Game::DeveloperId))
                    .col(string(Game::Title))
                    .col(string(Game::ShortDescription))
                    .col(text(Game::Description))
                    .col(string_null(Game::Genre))
                    .col(big_integer(Game::PriceCents))
                    .col(string_null(Game::CoverImageKey))
                    .col(boolean(Game::IsPublished).default(false))
                    .col(timestamp_with_time_zone_null(Game::ReleaseDate))
                    .col(boolean(Game::IsDeleted).default(false))
                    .col(timestamp_with_time_zone(Game::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Game::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_developer_id")
                            .from(Game::Table, Game::DeveloperId)
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
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Game {
    Table,
    Id,
    DeveloperId,
    Title,
    ShortDescription,
    Description,
    Genre,
    PriceCents,
    CoverImageKey,
    IsPublished,
    ReleaseDate,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}
