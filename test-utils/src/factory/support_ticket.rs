//! Support ticket factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct SupportTicketFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    subject: String,
    status: String,
    priority: String,
    assigned_to: Option<i32>,
    is_deleted: bool,
}

impl<'a> SupportTicketFactory<'a> {
    /// Defaults to an `open`, `medium` priority ticket.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            subject: format!("Ticket {}", next_id()),
            status: "open".to_string(),
            priority: "medium".to_string(),
            assigned_to: None,
            is_deleted: false,
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn assigned_to(mut self, assignee_id: i32) -> Self {
        self.assigned_to = Some(assignee_id);
        self
    }

    pub fn deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    pub async fn build(self) -> Result<entity::support_ticket::Model, DbErr> {
        let now = Utc::now();
        entity::support_ticket::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            subject: ActiveValue::Set(self.subject),
            description: ActiveValue::Set("Something went wrong".to_string()),
            status: ActiveValue::Set(self.status),
            priority: ActiveValue::Set(self.priority),
            assigned_to: ActiveValue::Set(self.assigned_to),
            is_deleted: ActiveValue::Set(self.is_deleted),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_ticket(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::support_ticket::Model, DbErr> {
    SupportTicketFactory::new(db, user_id).build().await
}
