use chrono::{DateTime, Utc};

use crate::model::audit::AuditLogDto;

#[derive(Debug, Clone, PartialEq)]
pub struct AuditLog {
    pub id: i32,
    pub user_id: Option<i32>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn from_entity(entity: entity::audit_log::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            action: entity.action,
            entity_type: entity.entity_type,
            entity_id: entity.entity_id,
            details: entity.details,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> AuditLogDto {
        AuditLogDto {
            id: self.id,
            user_id: self.user_id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            details: self.details,
            created_at: self.created_at,
        }
    }
}

/// A new audit record.
///
/// `action` is a dotted verb such as `user.delete`; `entity_id` is kept as text so
/// upload UUIDs and integer ids share the column.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub user_id: Option<i32>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub details: Option<String>,
}

impl AuditEntry {
    pub fn new(user_id: i32, action: &str, entity_type: &str, entity_id: impl ToString) -> Self {
        Self {
            user_id: Some(user_id),
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: Some(entity_id.to_string()),
            details: None,
        }
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditLogSearchParam {
    pub entity_type: Option<String>,
    pub user_id: Option<i32>,
    pub page: u64,
    pub per_page: u64,
}
