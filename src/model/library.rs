use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Longest single play session that can be reported, one day.
pub const MAX_PLAY_SESSION_SECONDS: i64 = 86_400;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LibraryEntryDto {
    pub game_id: i32,
    pub title: String,
    /// Highest released version, if any.
    pub latest_version: Option<String>,
    pub play_time_seconds: i64,
    pub last_played_at: Option<DateTime<Utc>>,
    pub acquired_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct PlayTimeDto {
    #[validate(range(min = 1, max = 86_400))]
    pub seconds: i64,
}
