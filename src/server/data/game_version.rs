use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    server::model::game::{CreateGameVersionParam, GameVersion},
    version,
};

pub struct GameVersionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GameVersionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateGameVersionParam) -> Result<GameVersion, DbErr> {
        let entity = entity::game_version::ActiveModel {
            game_id: ActiveValue::Set(param.game_id),
            version: ActiveValue::Set(param.version),
            changelog: ActiveValue::Set(param.changelog),
            file_name: ActiveValue::Set(param.file_name),
            file_key: ActiveValue::Set(param.file_key),
            file_size: ActiveValue::Set(param.file_size),
            file_hash: ActiveValue::Set(param.file_hash),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(GameVersion::from_entity(entity))
    }

    /// Finds a version belonging to `game_id`.
    pub async fn find_by_id(&self, game_id: i32, id: i32) -> Result<Option<GameVersion>, DbErr> {
        let entity = entity::prelude::GameVersion::find_by_id(id)
            .filter(entity::game_version::Column::GameId.eq(game_id))
            .one(self.db)
            .await?;

        Ok(entity.map(GameVersion::from_entity))
    }

    pub async fn exists(&self, game_id: i32, version: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::GameVersion::find()
            .filter(entity::game_version::Column::GameId.eq(game_id))
            .filter(entity::game_version::Column::Version.eq(version))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn count_by_game(&self, game_id: i32) -> Result<u64, DbErr> {
        entity::prelude::GameVersion::find()
            .filter(entity::game_version::Column::GameId.eq(game_id))
            .count(self.db)
            .await
    }

    /// All versions of a game, newest upload first.
    pub async fn list_by_game(&self, game_id: i32) -> Result<Vec<GameVersion>, DbErr> {
        let entities = entity::prelude::GameVersion::find()
            .filter(entity::game_version::Column::GameId.eq(game_id))
            .order_by_desc(entity::game_version::Column::CreatedAt)
            .order_by_desc(entity::game_version::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(GameVersion::from_entity).collect())
    }

    /// Highest version of a game by release version ordering, not upload time.
    pub async fn latest(&self, game_id: i32) -> Result<Option<GameVersion>, DbErr> {
        let versions = self.list_by_game(game_id).await?;

        Ok(versions
            .into_iter()
            .max_by(|a, b| version::compare(&a.version, &b.version)))
    }
}
