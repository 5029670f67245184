//! Game catalog domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::game::{GameDto, GameVersionDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i32,
    /// User id of the developer who owns the listing.
    pub developer_id: i32,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub genre: Option<String>,
    pub price_cents: i64,
    pub cover_image_key: Option<String>,
    pub is_published: bool,
    pub release_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn from_entity(entity: entity::game::Model) -> Self {
        Self {
            id: entity.id,
            developer_id: entity.developer_id,
            title: entity.title,
            short_description: entity.short_description,
            description: entity.description,
            genre: entity.genre,
            price_cents: entity.price_cents,
            cover_image_key: entity.cover_image_key,
            is_published: entity.is_published,
            release_date: entity.release_date,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> GameDto {
        GameDto {
            id: self.id,
            developer_id: self.developer_id,
            title: self.title,
            short_description: self.short_description,
            description: self.description,
            genre: self.genre,
            price_cents: self.price_cents,
            cover_image_key: self.cover_image_key,
            is_published: self.is_published,
            release_date: self.release_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A downloadable release of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameVersion {
    pub id: i32,
    pub game_id: i32,
    pub version: String,
    pub changelog: Option<String>,
    pub file_name: String,
    /// Object key in the `games` bucket.
    pub file_key: String,
    pub file_size: i64,
    /// Lowercase hex SHA-256 of the binary.
    pub file_hash: String,
    pub created_at: DateTime<Utc>,
}

impl GameVersion {
    pub fn from_entity(entity: entity::game_version::Model) -> Self {
        Self {
            id: entity.id,
            game_id: entity.game_id,
            version: entity.version,
            changelog: entity.changelog,
            file_name: entity.file_name,
            file_key: entity.file_key,
            file_size: entity.file_size,
            file_hash: entity.file_hash,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> GameVersionDto {
        GameVersionDto {
            id: self.id,
            game_id: self.game_id,
            version: self.version,
            changelog: self.changelog,
            file_name: self.file_name,
            file_size: self.file_size,
            file_hash: self.file_hash,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateGameParam {
    pub developer_id: i32,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub genre: Option<String>,
    pub price_cents: i64,
    pub release_date: Option<DateTime<Utc>>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateGameParam {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub price_cents: Option<i64>,
    pub release_date: Option<DateTime<Utc>>,
}

/// Filters for the public catalog listing.
#[derive(Debug, Clone, Default)]
pub struct GameSearchParam {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    pub genre: Option<String>,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone)]
pub struct CreateGameVersionParam {
    pub game_id: i32,
    pub version: String,
    pub changelog: Option<String>,
    pub file_name: String,
    pub file_key: String,
    pub file_size: i64,
    pub file_hash: String,
}
