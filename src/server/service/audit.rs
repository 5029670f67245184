use sea_orm::ConnectionTrait;

use crate::server::{
    data::audit_log::AuditLogRepository,
    error::AppError,
    model::{
        audit::{AuditEntry, AuditLog, AuditLogSearchParam},
        Paginated,
    },
};

/// Records and queries the audit trail of privileged actions.
///
/// Generic over the connection so entries can be written inside the transaction of the
/// action they describe.
pub struct AuditLogService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuditLogService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn record(&self, entry: AuditEntry) -> Result<AuditLog, AppError> {
        Ok(AuditLogRepository::new(self.db).create(entry).await?)
    }

    /// Records an entry, logging instead of failing when the write does not succeed.
    pub async fn record_best_effort(&self, entry: AuditEntry) {
        let action = entry.action.clone();
        if let Err(err) = AuditLogRepository::new(self.db).create(entry).await {
            tracing::warn!("Failed to record audit entry '{}': {}", action, err);
        }
    }

    pub async fn search(&self, param: AuditLogSearchParam) -> Result<Paginated<AuditLog>, AppError> {
        let (entries, total) = AuditLogRepository::new(self.db)
            .search_paginated(&param)
            .await?;

        Ok(Paginated::new(entries, total, param.page, param.per_page))
    }
}
