//! Library repository: which games a user owns and how long they played them.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{game::GameRepository, game_version::GameVersionRepository},
    model::library::LibraryEntry,
};

pub struct LibraryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LibraryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn owns(&self, user_id: i32, game_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::LibraryEntry::find()
            .filter(entity::library_entry::Column::UserId.eq(user_id))
            .filter(entity::library_entry::Column::GameId.eq(game_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Adds a game to the user's library unless it is already there.
    ///
    /// # Returns
    /// - `Ok(true)` - Entry created
    /// - `Ok(false)` - User already owned the game
    pub async fn grant(
        &self,
        user_id: i32,
        game_id: i32,
        order_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        if self.owns(user_id, game_id).await? {
            return Ok(false);
        }

        entity::library_entry::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            game_id: ActiveValue::Set(game_id),
            order_id: ActiveValue::Set(order_id),
            play_time_seconds: ActiveValue::Set(0),
            last_played_at: ActiveValue::Set(None),
            acquired_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Removes the entries that were granted by `order_id`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of entries removed
    pub async fn revoke_by_order(&self, order_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::LibraryEntry::delete_many()
            .filter(entity::library_entry::Column::OrderId.eq(order_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// The user's library, most recently acquired first.
    ///
    /// Each entry carries the game title and the highest released version.
    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<LibraryEntry>, DbErr> {
        let entities = entity::prelude::LibraryEntry::find()
            .filter(entity::library_entry::Column::UserId.eq(user_id))
            .order_by_desc(entity::library_entry::Column::AcquiredAt)
            .order_by_desc(entity::library_entry::Column::Id)
            .all(self.db)
            .await?;

        let game_ids: Vec<i32> = entities.iter().map(|e| e.game_id).collect();
        let titles: HashMap<i32, String> = GameRepository::new(self.db)
            .find_many(&game_ids)
            .await?
            .into_iter()
            .map(|g| (g.id, g.title))
            .collect();

        let mut entries = Vec::with_capacity(entities.len());
        for entity in entities {
            let Some(title) = titles.get(&entity.game_id) else {
                continue;
            };
            entries.push(self.into_entry(entity, title.clone()).await?);
        }

        Ok(entries)
    }

    /// One library entry, `None` when the user does not own the game.
    pub async fn find(&self, user_id: i32, game_id: i32) -> Result<Option<LibraryEntry>, DbErr> {
        let Some(entity) = entity::prelude::LibraryEntry::find()
            .filter(entity::library_entry::Column::UserId.eq(user_id))
            .filter(entity::library_entry::Column::GameId.eq(game_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let Some(game) = GameRepository::new(self.db).find_by_id(game_id).await? else {
            return Ok(None);
        };

        Ok(Some(self.into_entry(entity, game.title).await?))
    }

    /// Adds `seconds` to the play time counter and stamps `last_played_at`.
    ///
    /// # Returns
    /// - `Ok(true)` - Entry updated
    /// - `Ok(false)` - User does not own the game
    pub async fn add_play_time(&self, user_id: i32, game_id: i32, seconds: i64) -> Result<bool, DbErr> {
        let Some(entity) = entity::prelude::LibraryEntry::find()
            .filter(entity::library_entry::Column::UserId.eq(user_id))
            .filter(entity::library_entry::Column::GameId.eq(game_id))
            .one(self.db)
            .await?
        else {
            return Ok(false);
        };

        let play_time_seconds = entity.play_time_seconds.saturating_add(seconds);
        let mut active: entity::library_entry::ActiveModel = entity.into();
        active.play_time_seconds = ActiveValue::Set(play_time_seconds);
        active.last_played_at = ActiveValue::Set(Some(Utc::now()));
        active.update(self.db).await?;

        Ok(true)
    }

    async fn into_entry(
        &self,
        entity: entity::library_entry::Model,
        title: String,
    ) -> Result<LibraryEntry, DbErr> {
        let latest_version = GameVersionRepository::new(self.db)
            .latest(entity.game_id)
            .await?
            .map(|v| v.version);

        Ok(LibraryEntry {
            game_id: entity.game_id,
            title,
            latest_version,
            play_time_seconds: entity.play_time_seconds,
            last_played_at: entity.last_played_at,
            acquired_at: entity.acquired_at,
        })
    }
}
