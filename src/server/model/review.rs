use chrono::{DateTime, Utc};

use crate::model::review::ReviewDto;

/// A review together with its author's username.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub game_id: i32,
    pub user_id: i32,
    pub username: String,
    pub rating: i16,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(entity: entity::review::Model, username: String) -> Self {
        Self {
            id: entity.id,
            game_id: entity.game_id,
            user_id: entity.user_id,
            username,
            rating: entity.rating,
            content: entity.content,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            game_id: self.game_id,
            user_id: self.user_id,
            username: self.username,
            rating: self.rating,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReviewParam {
    pub game_id: i32,
    pub user_id: i32,
    pub rating: i16,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReviewParam {
    pub rating: Option<i16>,
    pub content: Option<String>,
}
