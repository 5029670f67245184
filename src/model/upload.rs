use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::validation::{validate_file_name, validate_version};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    InProgress,
    Completed,
    Aborted,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "aborted" => Ok(Self::Aborted),
            other => Err(format!("Unknown upload status '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateUploadDto {
    pub game_id: i32,
    #[validate(custom(function = "validate_version"))]
    pub version: String,
    #[validate(custom(function = "validate_file_name"))]
    pub file_name: String,
    #[validate(range(min = 1, max = 10_000))]
    pub total_chunks: i32,
    #[validate(range(min = 1))]
    pub total_size: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UploadSessionDto {
    pub id: String,
    pub game_id: i32,
    pub version: String,
    pub file_name: String,
    pub total_chunks: i32,
    pub total_size: i64,
    /// Number of distinct chunk indexes received so far.
    pub uploaded_chunks: i32,
    pub status: UploadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct CompleteUploadDto {
    #[validate(length(max = 10000))]
    pub changelog: Option<String>,
}
