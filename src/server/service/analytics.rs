use std::collections::BTreeSet;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::analytics::AnalyticsRepository,
    error::AppError,
    model::{
        analytics::{
            AnalyticsEvent, AnalyticsSession, AnalyticsSummary, EventSearchParam, TrackEventParam,
        },
        Paginated,
    },
};

pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn start_session(
        &self,
        user_id: Option<i32>,
        platform: String,
        app_version: Option<String>,
    ) -> Result<AnalyticsSession, AppError> {
        Ok(AnalyticsRepository::new(self.db)
            .start_session(user_id, platform, app_version)
            .await?)
    }

    /// Ends a session. Ending twice keeps the first `ended_at`.
    pub async fn end_session(&self, id: i32) -> Result<AnalyticsSession, AppError> {
        let repo = AnalyticsRepository::new(self.db);

        if repo.find_session(id).await?.is_none() {
            return Err(AppError::NotFound("Session not found".to_string()));
        }
        repo.end_session(id).await?;

        repo.find_session(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
    }

    /// Stores a batch of events, all or none.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of stored events
    /// - `Err(AppError::NotFound)` - An event references a session that does not exist
    pub async fn track(
        &self,
        user_id: Option<i32>,
        events: Vec<TrackEventParam>,
    ) -> Result<u64, AppError> {
        let repo = AnalyticsRepository::new(self.db);
        let session_ids: BTreeSet<i32> = events.iter().filter_map(|e| e.session_id).collect();
        for session_id in session_ids {
            if repo.find_session(session_id).await?.is_none() {
                return Err(AppError::NotFound(format!(
                    "Session {} not found",
                    session_id
                )));
            }
        }

        let events = events
            .into_iter()
            .map(|event| TrackEventParam {
                user_id: event.user_id.or(user_id),
                ..event
            })
            .collect();

        let txn = self.db.begin().await?;
        let count = AnalyticsRepository::new(&txn).insert_events(events).await?;
        txn.commit().await?;

        Ok(count)
    }

    pub async fn search_events(
        &self,
        param: EventSearchParam,
    ) -> Result<Paginated<AnalyticsEvent>, AppError> {
        let (events, total) = AnalyticsRepository::new(self.db)
            .search_events(&param)
            .await?;

        Ok(Paginated::new(events, total, param.page, param.per_page))
    }

    pub async fn summary(&self) -> Result<AnalyticsSummary, AppError> {
        Ok(AnalyticsRepository::new(self.db).summary().await?)
    }
}
