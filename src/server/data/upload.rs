//! Upload session and chunk repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::upload::UploadStatus,
    server::model::upload::{CreateUploadParam, UploadSession},
};

pub struct UploadRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UploadRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateUploadParam) -> Result<UploadSession, DbErr> {
        let now = Utc::now();

        let entity = entity::upload_session::ActiveModel {
            id: ActiveValue::Set(param.id),
            user_id: ActiveValue::Set(param.user_id),
            game_id: ActiveValue::Set(param.game_id),
            version: ActiveValue::Set(param.version),
            file_name: ActiveValue::Set(param.file_name),
            total_chunks: ActiveValue::Set(param.total_chunks),
            total_size: ActiveValue::Set(param.total_size),
            uploaded_chunks: ActiveValue::Set(0),
            status: ActiveValue::Set(UploadStatus::InProgress.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        UploadSession::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<UploadSession>, DbErr> {
        entity::prelude::UploadSession::find_by_id(id.to_string())
            .one(self.db)
            .await?
            .map(UploadSession::from_entity)
            .transpose()
    }

    /// Whether an in-progress upload already targets this game version.
    pub async fn in_progress_exists(&self, game_id: i32, version: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::UploadSession::find()
            .filter(entity::upload_session::Column::GameId.eq(game_id))
            .filter(entity::upload_session::Column::Version.eq(version))
            .filter(
                entity::upload_session::Column::Status.eq(UploadStatus::InProgress.as_str()),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Records a received chunk, replacing the size if the index was sent before, then
    /// refreshes `uploaded_chunks` from the distinct indexes stored.
    ///
    /// # Returns
    /// - `Ok(i32)` - Distinct chunks received so far
    /// - `Err(DbErr)` - Database error
    pub async fn record_chunk(&self, upload_id: &str, index: i32, size: i64) -> Result<i32, DbErr> {
        let now = Utc::now();

        let existing = entity::prelude::UploadChunk::find()
            .filter(entity::upload_chunk::Column::UploadId.eq(upload_id))
            .filter(entity::upload_chunk::Column::ChunkIndex.eq(index))
            .one(self.db)
            .await?;

        match existing {
            Some(chunk) => {
                let mut active: entity::upload_chunk::ActiveModel = chunk.into();
                active.size = ActiveValue::Set(size);
                active.created_at = ActiveValue::Set(now);
                active.update(self.db).await?;
            }
            None => {
                entity::upload_chunk::ActiveModel {
                    upload_id: ActiveValue::Set(upload_id.to_string()),
                    chunk_index: ActiveValue::Set(index),
                    size: ActiveValue::Set(size),
                    created_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await?;
            }
        }

        let uploaded = entity::prelude::UploadChunk::find()
            .filter(entity::upload_chunk::Column::UploadId.eq(upload_id))
            .count(self.db)
            .await? as i32;

        entity::prelude::UploadSession::update_many()
            .filter(entity::upload_session::Column::Id.eq(upload_id))
            .col_expr(
                entity::upload_session::Column::UploadedChunks,
                Expr::value(uploaded),
            )
            .col_expr(entity::upload_session::Column::UpdatedAt, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(uploaded)
    }

    /// Stored chunks as `(index, size)`, ordered by index.
    pub async fn chunks(&self, upload_id: &str) -> Result<Vec<(i32, i64)>, DbErr> {
        let entities = entity::prelude::UploadChunk::find()
            .filter(entity::upload_chunk::Column::UploadId.eq(upload_id))
            .order_by_asc(entity::upload_chunk::Column::ChunkIndex)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|c| (c.chunk_index, c.size)).collect())
    }

    pub async fn delete_chunks(&self, upload_id: &str) -> Result<(), DbErr> {
        entity::prelude::UploadChunk::delete_many()
            .filter(entity::upload_chunk::Column::UploadId.eq(upload_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Moves an `in_progress` session to `status`.
    ///
    /// # Returns
    /// - `Ok(true)` - Session was in progress and has been updated
    /// - `Ok(false)` - Session missing or already finished
    pub async fn finish(&self, upload_id: &str, status: UploadStatus) -> Result<bool, DbErr> {
        let result = entity::prelude::UploadSession::update_many()
            .filter(entity::upload_session::Column::Id.eq(upload_id))
            .filter(
                entity::upload_session::Column::Status.eq(UploadStatus::InProgress.as_str()),
            )
            .col_expr(entity::upload_session::Column::Status, Expr::value(status.as_str()))
            .col_expr(entity::upload_session::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// In-progress sessions with no activity since `cutoff`.
    pub async fn find_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<UploadSession>, DbErr> {
        entity::prelude::UploadSession::find()
            .filter(
                entity::upload_session::Column::Status.eq(UploadStatus::InProgress.as_str()),
            )
            .filter(entity::upload_session::Column::UpdatedAt.lt(cutoff))
            .all(self.db)
            .await?
            .into_iter()
            .map(UploadSession::from_entity)
            .collect()
    }
}
