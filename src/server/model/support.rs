//! Support ticket domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::support::{
        SupportTicketDetailDto, SupportTicketDto, TicketMessageDto, TicketPriority, TicketStatus,
    },
    server::model::parse_status,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SupportTicket {
    pub id: i32,
    /// Ticket owner.
    pub user_id: i32,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    /// Support agent handling the ticket.
    pub assigned_to: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupportTicket {
    pub fn from_entity(entity: entity::support_ticket::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            subject: entity.subject,
            description: entity.description,
            status: parse_status(&entity.status)?,
            priority: parse_status(&entity.priority)?,
            assigned_to: entity.assigned_to,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> SupportTicketDto {
        SupportTicketDto {
            id: self.id,
            user_id: self.user_id,
            subject: self.subject,
            description: self.description,
            status: self.status,
            priority: self.priority,
            assigned_to: self.assigned_to,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketMessage {
    pub id: i32,
    pub ticket_id: i32,
    pub author_id: i32,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl TicketMessage {
    pub fn from_entity(entity: entity::ticket_message::Model) -> Self {
        Self {
            id: entity.id,
            ticket_id: entity.ticket_id,
            author_id: entity.author_id,
            message: entity.message,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> TicketMessageDto {
        TicketMessageDto {
            id: self.id,
            ticket_id: self.ticket_id,
            author_id: self.author_id,
            message: self.message,
            created_at: self.created_at,
        }
    }
}

/// A ticket with its conversation, oldest message first.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportTicketDetail {
    pub ticket: SupportTicket,
    pub messages: Vec<TicketMessage>,
}

impl SupportTicketDetail {
    pub fn into_dto(self) -> SupportTicketDetailDto {
        SupportTicketDetailDto {
            ticket: self.ticket.into_dto(),
            messages: self
                .messages
                .into_iter()
                .map(TicketMessage::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTicketParam {
    pub user_id: i32,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
}

/// Listing filter. `user_id` restricts to one owner; support staff pass `None`.
#[derive(Debug, Clone, Default)]
pub struct TicketSearchParam {
    pub user_id: Option<i32>,
    pub status: Option<TicketStatus>,
    pub page: u64,
    pub per_page: u64,
}
