use chrono::{DateTime, Utc};

use crate::model::library::LibraryEntryDto;

/// An owned game as shown in the user's library.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    pub game_id: i32,
    pub title: String,
    /// Highest released version, if any release exists.
    pub latest_version: Option<String>,
    pub play_time_seconds: i64,
    pub last_played_at: Option<DateTime<Utc>>,
    pub acquired_at: DateTime<Utc>,
}

impl LibraryEntry {
    pub fn into_dto(self) -> LibraryEntryDto {
        LibraryEntryDto {
            game_id: self.game_id,
            title: self.title,
            latest_version: self.latest_version,
            play_time_seconds: self.play_time_seconds,
            last_played_at: self.last_played_at,
            acquired_at: self.acquired_at,
        }
    }
}
