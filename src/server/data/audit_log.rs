use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::audit::{AuditEntry, AuditLog, AuditLogSearchParam};

pub struct AuditLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuditLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, entry: AuditEntry) -> Result<AuditLog, DbErr> {
        let entity = entity::audit_log::ActiveModel {
            user_id: ActiveValue::Set(entry.user_id),
            action: ActiveValue::Set(entry.action),
            entity_type: ActiveValue::Set(entry.entity_type),
            entity_id: ActiveValue::Set(entry.entity_id),
            details: ActiveValue::Set(entry.details),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(AuditLog::from_entity(entity))
    }

    /// Audit records newest first.
    ///
    /// # Arguments
    /// - `param` - Optional `entity_type` and `user_id` filters plus pagination
    ///
    /// # Returns
    /// - `Ok((logs, total))` - Records for the requested page and total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn search_paginated(
        &self,
        param: &AuditLogSearchParam,
    ) -> Result<(Vec<AuditLog>, u64), DbErr> {
        let mut query = entity::prelude::AuditLog::find()
            .order_by_desc(entity::audit_log::Column::CreatedAt)
            .order_by_desc(entity::audit_log::Column::Id);

        if let Some(entity_type) = param.entity_type.as_deref() {
            query = query.filter(entity::audit_log::Column::EntityType.eq(entity_type));
        }
        if let Some(user_id) = param.user_id {
            query = query.filter(entity::audit_log::Column::UserId.eq(user_id));
        }

        let paginator = query.paginate(self.db, param.per_page);
        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(param.page).await?;

        Ok((entities.into_iter().map(AuditLog::from_entity).collect(), total))
    }
}
