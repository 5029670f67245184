//! Analytics session and event repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::analytics::{
    AnalyticsEvent, AnalyticsSession, AnalyticsSummary, EventSearchParam, TrackEventParam,
};

pub struct AnalyticsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AnalyticsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn start_session(
        &self,
        user_id: Option<i32>,
        platform: String,
        app_version: Option<String>,
    ) -> Result<AnalyticsSession, DbErr> {
        let entity = entity::analytics_session::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            platform: ActiveValue::Set(platform),
            app_version: ActiveValue::Set(app_version),
            started_at: ActiveValue::Set(Utc::now()),
            ended_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(AnalyticsSession::from_entity(entity))
    }

    pub async fn find_session(&self, id: i32) -> Result<Option<AnalyticsSession>, DbErr> {
        let entity = entity::prelude::AnalyticsSession::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(AnalyticsSession::from_entity))
    }

    /// Stamps `ended_at` unless the session already ended.
    pub async fn end_session(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::AnalyticsSession::update_many()
            .filter(entity::analytics_session::Column::Id.eq(id))
            .filter(entity::analytics_session::Column::EndedAt.is_null())
            .col_expr(
                entity::analytics_session::Column::EndedAt,
                Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Inserts a batch of events.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of events stored
    /// - `Err(DbErr)` - Database error, nothing is stored when run in a transaction
    pub async fn insert_events(&self, events: Vec<TrackEventParam>) -> Result<u64, DbErr> {
        let now = Utc::now();
        let count = events.len() as u64;

        for event in events {
            entity::analytics_event::ActiveModel {
                session_id: ActiveValue::Set(event.session_id),
                user_id: ActiveValue::Set(event.user_id),
                event_type: ActiveValue::Set(event.event_type),
                payload: ActiveValue::Set(event.payload.map(|p| p.to_string())),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(count)
    }

    /// Events newest first, filtered by type and session when given.
    pub async fn search_events(
        &self,
        param: &EventSearchParam,
    ) -> Result<(Vec<AnalyticsEvent>, u64), DbErr> {
        let mut query = entity::prelude::AnalyticsEvent::find()
            .order_by_desc(entity::analytics_event::Column::CreatedAt)
            .order_by_desc(entity::analytics_event::Column::Id);

        if let Some(event_type) = param.event_type.as_deref() {
            query = query.filter(entity::analytics_event::Column::EventType.eq(event_type));
        }
        if let Some(session_id) = param.session_id {
            query = query.filter(entity::analytics_event::Column::SessionId.eq(session_id));
        }

        let paginator = query.paginate(self.db, param.per_page);
        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(param.page).await?;

        Ok((
            entities.into_iter().map(AnalyticsEvent::from_entity).collect(),
            total,
        ))
    }

    /// Event counts per type plus session totals.
    pub async fn summary(&self) -> Result<AnalyticsSummary, DbErr> {
        let mut event_counts: Vec<(String, i64)> = entity::prelude::AnalyticsEvent::find()
            .select_only()
            .column(entity::analytics_event::Column::EventType)
            .column_as(entity::analytics_event::Column::Id.count(), "count")
            .group_by(entity::analytics_event::Column::EventType)
            .into_tuple()
            .all(self.db)
            .await?;
        event_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let total_sessions = entity::prelude::AnalyticsSession::find()
            .count(self.db)
            .await?;
        let active_sessions = entity::prelude::AnalyticsSession::find()
            .filter(entity::analytics_session::Column::EndedAt.is_null())
            .count(self.db)
            .await?;

        Ok(AnalyticsSummary {
            event_counts: event_counts
                .into_iter()
                .map(|(event_type, count)| (event_type, count.max(0) as u64))
                .collect(),
            total_sessions,
            active_sessions,
        })
    }
}
