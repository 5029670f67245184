//! Chunked upload domain models.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::upload::{UploadSessionDto, UploadStatus},
    server::model::parse_status,
};

#[derive(Debug, Clone, PartialEq)]
pub struct UploadSession {
    /// UUID string.
    pub id: String,
    /// Uploader; only they may send chunks.
    pub user_id: i32,
    pub game_id: i32,
    pub version: String,
    pub file_name: String,
    pub total_chunks: i32,
    pub total_size: i64,
    /// Distinct chunk indexes received so far.
    pub uploaded_chunks: i32,
    pub status: UploadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UploadSession {
    pub fn from_entity(entity: entity::upload_session::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            game_id: entity.game_id,
            version: entity.version,
            file_name: entity.file_name,
            total_chunks: entity.total_chunks,
            total_size: entity.total_size,
            uploaded_chunks: entity.uploaded_chunks,
            status: parse_status(&entity.status)?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> UploadSessionDto {
        UploadSessionDto {
            id: self.id,
            game_id: self.game_id,
            version: self.version,
            file_name: self.file_name,
            total_chunks: self.total_chunks,
            total_size: self.total_size,
            uploaded_chunks: self.uploaded_chunks,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Key of the final binary in the `games` bucket.
    pub fn file_key(&self) -> String {
        format!("{}/{}/{}", self.game_id, self.version, self.file_name)
    }
}

/// Key of one chunk in the `uploads` bucket. Zero padding keeps keys sortable.
pub fn chunk_key(upload_id: &str, index: i32) -> String {
    format!("{}/{:05}", upload_id, index)
}

#[derive(Debug, Clone)]
pub struct CreateUploadParam {
    pub id: String,
    pub user_id: i32,
    pub game_id: i32,
    pub version: String,
    pub file_name: String,
    pub total_chunks: i32,
    pub total_size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_keys_are_zero_padded() {
        assert_eq!(chunk_key("abc", 0), "abc/00000");
        assert_eq!(chunk_key("abc", 42), "abc/00042");
        assert_eq!(chunk_key("abc", 9999), "abc/09999");
    }
}
