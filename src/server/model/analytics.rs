//! Analytics domain models.
//!
//! Event payloads are stored as JSON text and parsed back on read; a payload that no
//! longer parses is returned as a plain JSON string instead of failing the listing.

use chrono::{DateTime, Utc};

use crate::model::analytics::{
    AnalyticsEventDto, AnalyticsSessionDto, AnalyticsSummaryDto, EventTypeCountDto,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSession {
    pub id: i32,
    pub user_id: Option<i32>,
    pub platform: String,
    pub app_version: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl AnalyticsSession {
    pub fn from_entity(entity: entity::analytics_session::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            platform: entity.platform,
            app_version: entity.app_version,
            started_at: entity.started_at,
            ended_at: entity.ended_at,
        }
    }

    pub fn into_dto(self) -> AnalyticsSessionDto {
        AnalyticsSessionDto {
            id: self.id,
            user_id: self.user_id,
            platform: self.platform,
            app_version: self.app_version,
            started_at: self.started_at,
            ended_at: self.ended_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub id: i32,
    pub session_id: Option<i32>,
    pub user_id: Option<i32>,
    pub event_type: String,
    pub payload: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn from_entity(entity: entity::analytics_event::Model) -> Self {
        let payload = entity.payload.map(|raw| {
            serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
        });

        Self {
            id: entity.id,
            session_id: entity.session_id,
            user_id: entity.user_id,
            event_type: entity.event_type,
            payload,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> AnalyticsEventDto {
        AnalyticsEventDto {
            id: self.id,
            session_id: self.session_id,
            user_id: self.user_id,
            event_type: self.event_type,
            payload: self.payload,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrackEventParam {
    pub session_id: Option<i32>,
    pub user_id: Option<i32>,
    pub event_type: String,
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct EventSearchParam {
    pub event_type: Option<String>,
    pub session_id: Option<i32>,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticsSummary {
    /// `(event_type, count)` ordered by count descending.
    pub event_counts: Vec<(String, u64)>,
    pub total_sessions: u64,
    /// Sessions without an `ended_at`.
    pub active_sessions: u64,
}

impl AnalyticsSummary {
    pub fn into_dto(self) -> AnalyticsSummaryDto {
        AnalyticsSummaryDto {
            event_counts: self
                .event_counts
                .into_iter()
                .map(|(event_type, count)| EventTypeCountDto { event_type, count })
                .collect(),
            total_sessions: self.total_sessions,
            active_sessions: self.active_sessions,
        }
    }
}
