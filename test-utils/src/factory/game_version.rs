//! Game version factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating released versions of a game.
pub struct GameVersionFactory<'a> {
    db: &'a DatabaseConnection,
    game_id: i32,
    version: String,
    file_name: String,
    file_size: i64,
    file_hash: String,
}

impl<'a> GameVersionFactory<'a> {
    /// Defaults to version `1.0.0`, file `game.bin` of 4 bytes.
    pub fn new(db: &'a DatabaseConnection, game_id: i32) -> Self {
        Self {
            db,
            game_id,
            version: "1.0.0".to_string(),
            file_name: "game.bin".to_string(),
            file_size: 4,
            file_hash: "0".repeat(64),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn file_size(mut self, file_size: i64) -> Self {
        self.file_size = file_size;
        self
    }

    pub fn file_hash(mut self, file_hash: impl Into<String>) -> Self {
        self.file_hash = file_hash.into();
        self
    }

    /// Inserts the version. The object key follows `{game_id}/{version}/{file_name}`.
    pub async fn build(self) -> Result<entity::game_version::Model, DbErr> {
        let file_key = format!("{}/{}/{}", self.game_id, self.version, self.file_name);
        entity::game_version::ActiveModel {
            game_id: ActiveValue::Set(self.game_id),
            version: ActiveValue::Set(self.version),
            changelog: ActiveValue::Set(None),
            file_name: ActiveValue::Set(self.file_name),
            file_key: ActiveValue::Set(file_key),
            file_size: ActiveValue::Set(self.file_size),
            file_hash: ActiveValue::Set(self.file_hash),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_game_version(
    db: &DatabaseConnection,
    game_id: i32,
    version: &str,
) -> Result<entity::game_version::Model, DbErr> {
    GameVersionFactory::new(db, game_id)
        .version(version)
        .build()
        .await
}
