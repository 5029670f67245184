use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::model::{api::default_entries, validation::validate_not_blank};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GameDto {
    pub id: i32,
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

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateGameDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 500))]
    pub short_description: String,
    #[validate(length(max = 20000))]
    pub description: String,
    #[validate(length(min = 1, max = 50))]
    pub genre: Option<String>,
    /// Price in cents, at most 100 000.00.
    #[validate(range(min = 0, max = 10_000_000))]
    pub price_cents: i64,
    pub release_date: Option<DateTime<Utc>>,
}

/// Partial update; omitted fields keep their value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct UpdateGameDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub short_description: Option<String>,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub genre: Option<String>,
    #[validate(range(min = 0, max = 10_000_000))]
    pub price_cents: Option<i64>,
    pub release_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone, IntoParams)]
pub struct GameSearchParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    /// Exact genre match
    pub genre: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GameVersionDto {
    pub id: i32,
    pub game_id: i32,
    pub version: String,
    pub changelog: Option<String>,
    pub file_name: String,
    /// Size of the binary in bytes.
    pub file_size: i64,
    /// Lowercase hex SHA-256 of the binary.
    pub file_hash: String,
    pub created_at: DateTime<Utc>,
}
