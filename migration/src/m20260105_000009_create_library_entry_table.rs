use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260105_000003_create_game_table::Game,
    m20260105_000007_create_order_tables::Order,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LibraryEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(LibraryEntry::Id))
                    .col(integer(LibraryEntry::UserId))
                    .col(integer(LibraryEntry::GameId))
                    .col(integer_null(LibraryEntry::OrderId))
                    .col(big_integer(LibraryEntry::PlayTimeSeconds).default(0))
                    .col(timestamp_with_time_zone_null(LibraryEntry::LastPlayedAt))
                    .col(
                        timestamp_with_time_zone(LibraryEntry::AcquiredAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_library_entry_user_id")
                            .from(LibraryEntry::Table, LibraryEntry::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_library_entry_game_id")
                            .from(LibraryEntry::Table, LibraryEntry::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_library_entry_order_id")
                            .from(LibraryEntry::Table, LibraryEntry::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_library_entry_user_game")
                    .table(LibraryEntry::Table)
                    .col(LibraryEntry::UserId)
                    .col(LibraryEntry::GameId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LibraryEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LibraryEntry {
    Table,
    Id,
    UserId,
    GameId,
    OrderId,
    PlayTimeSeconds,
    LastPlayedAt,
    AcquiredAt,
}
