//! Upload session factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct UploadSessionFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    user_id: i32,
    game_id: i32,
    version: String,
    total_chunks: i32,
    total_size: i64,
    status: String,
    updated_at: DateTime<Utc>,
}

impl<'a> UploadSessionFactory<'a> {
    /// Defaults to an `in_progress` session of 2 chunks totalling 8 bytes.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, game_id: i32) -> Self {
        Self {
            db,
            id: format!("upload-{}", next_id()),
            user_id,
            game_id,
            version: "1.0.0".to_string(),
            total_chunks: 2,
            total_size: 8,
            status: "in_progress".to_string(),
            updated_at: Utc::now(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn total_chunks(mut self, total_chunks: i32) -> Self {
        self.total_chunks = total_chunks;
        self
    }

    pub fn total_size(mut self, total_size: i64) -> Self {
        self.total_size = total_size;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Overrides the last activity timestamp, used for expiry tests.
    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub async fn build(self) -> Result<entity::upload_session::Model, DbErr> {
        entity::upload_session::ActiveModel {
            id: ActiveValue::Set(self.id),
            user_id: ActiveValue::Set(self.user_id),
            game_id: ActiveValue::Set(self.game_id),
            version: ActiveValue::Set(self.version),
            file_name: ActiveValue::Set("game.bin".to_string()),
            total_chunks: ActiveValue::Set(self.total_chunks),
            total_size: ActiveValue::Set(self.total_size),
            uploaded_chunks: ActiveValue::Set(0),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(self.updated_at),
            updated_at: ActiveValue::Set(self.updated_at),
        }
        .insert(self.db)
        .await
    }
}
