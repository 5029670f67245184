//! Library entry factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for granting ownership of a game to a user.
pub struct LibraryEntryFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    game_id: i32,
    order_id: Option<i32>,
    play_time_seconds: i64,
}

impl<'a> LibraryEntryFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32, game_id: i32) -> Self {
        Self {
            db,
            user_id,
            game_id,
            order_id: None,
            play_time_seconds: 0,
        }
    }

    pub fn order_id(mut self, order_id: i32) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn play_time_seconds(mut self, seconds: i64) -> Self {
        self.play_time_seconds = seconds;
        self
    }

    pub async fn build(self) -> Result<entity::library_entry::Model, DbErr> {
        entity::library_entry::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            game_id: ActiveValue::Set(self.game_id),
            order_id: ActiveValue::Set(self.order_id),
            play_time_seconds: ActiveValue::Set(self.play_time_seconds),
            last_played_at: ActiveValue::Set(None),
            acquired_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_library_entry(
    db: &DatabaseConnection,
    user_id: i32,
    game_id: i32,
) -> Result<entity::library_entry::Model, DbErr> {
    LibraryEntryFactory::new(db, user_id, game_id).build().await
}
