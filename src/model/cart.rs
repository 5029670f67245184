use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CartDto {
    pub items: Vec<CartItemDto>,
    pub total_cents: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CartItemDto {
    pub game_id: i32,
    pub title: String,
    /// Price captured when the game was added.
    pub price_cents: i64,
    pub added_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct AddCartItemDto {
    pub game_id: i32,
}
