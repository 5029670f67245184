use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260105_000003_create_game_table::Game,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UploadSession::Table)
                    .if_not_exists()
                    .col(string(UploadSession::Id).primary_key())
                    .col(integer(UploadSession::UserId))
                    .col(integer(UploadSession::GameId))
                    .col(string(UploadSession::Version))
                    .col(string(UploadSession::FileName))
                    .col(integer(UploadSession::TotalChunks))
                    .col(big_integer(UploadSession::TotalSize))
                    .col(integer(UploadSession::UploadedChunks).default(0))
                    .col(string(UploadSession::Status))
                    .col(
                        timestamp_with_time_zone(UploadSession::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(UploadSession::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upload_session_user_id")
                            .from(UploadSession::Table, UploadSession::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upload_session_game_id")
                            .from(UploadSession::Table, UploadSession::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UploadChunk::Table)
                    .if_not_exists()
                    .col(pk_auto(UploadChunk::Id))
                    .col(string(UploadChunk::UploadId))
                    .col(integer(UploadChunk::ChunkIndex))
                    .col(big_integer(UploadChunk::Size))
                    .col(
                        timestamp_with_time_zone(UploadChunk::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upload_chunk_upload_id")
                            .from(UploadChunk::Table, UploadChunk::UploadId)
                            .to(UploadSession::Table, UploadSession::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_upload_chunk_upload_index")
                    .table(UploadChunk::Table)
                    .col(UploadChunk::UploadId)
                    .col(UploadChunk::ChunkIndex)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UploadChunk::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UploadSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UploadSession {
    Table,
    Id,
    UserId,
    GameId,
    Version,
    FileName,
    TotalChunks,
    TotalSize,
    UploadedChunks,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum UploadChunk {
    Table,
    Id,
    UploadId,
    ChunkIndex,
    Size,
    CreatedAt,
}
