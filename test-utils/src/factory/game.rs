//! Game factory for creating catalog entries.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test games owned by a developer.
pub struct GameFactory<'a> {
    db: &'a DatabaseConnection,
    developer_id: i32,
    title: String,
    genre: Option<String>,
    price_cents: i64,
    is_published: bool,
    is_deleted: bool,
}

impl<'a> GameFactory<'a> {
    /// Creates a new GameFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Game {id}"`
    /// - price_cents: `1999`
    /// - unpublished, not deleted
    pub fn new(db: &'a DatabaseConnection, developer_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            developer_id,
            title: format!("Game {}", id),
            genre: None,
            price_cents: 1999,
            is_published: false,
            is_deleted: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = price_cents;
        self
    }

    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    pub fn deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    pub async fn build(self) -> Result<entity::game::Model, DbErr> {
        let now = Utc::now();
        entity::game::ActiveModel {
            developer_id: ActiveValue::Set(self.developer_id),
            title: ActiveValue::Set(self.title),
            short_description: ActiveValue::Set("A short pitch".to_string()),
            description: ActiveValue::Set("A longer description".to_string()),
            genre: ActiveValue::Set(self.genre),
            price_cents: ActiveValue::Set(self.price_cents),
            cover_image_key: ActiveValue::Set(None),
            is_published: ActiveValue::Set(self.is_published),
            release_date: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(self.is_deleted),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unpublished game for the given developer.
pub async fn create_game(
    db: &DatabaseConnection,
    developer_id: i32,
) -> Result<entity::game::Model, DbErr> {
    GameFactory::new(db, developer_id).build().await
}
