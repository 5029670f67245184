use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::model::{api::default_entries, validation::validate_not_blank};

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct StartSessionDto {
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub platform: String,
    #[validate(length(max = 50))]
    pub app_version: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AnalyticsSessionDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub platform: String,
    pub app_version: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct TrackEventDto {
    pub session_id: Option<i32>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub event_type: String,
    #[schema(value_type = Option<Object>)]
    pub payload: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct TrackEventsDto {
    #[validate(length(min = 1, max = 100), nested)]
    pub events: Vec<TrackEventDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TrackedEventsDto {
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AnalyticsEventDto {
    pub id: i32,
    pub session_id: Option<i32>,
    pub user_id: Option<i32>,
    pub event_type: String,
    #[schema(value_type = Option<Object>)]
    pub payload: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EventTypeCountDto {
    pub event_type: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AnalyticsSummaryDto {
    /// Event counts ordered by event type.
    pub event_counts: Vec<EventTypeCountDto>,
    pub total_sessions: u64,
    /// Sessions that have not been ended.
    pub active_sessions: u64,
}

#[derive(Deserialize, Debug, Clone, IntoParams)]
pub struct EventSearchParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub event_type: Option<String>,
    pub session_id: Option<i32>,
}
