use sea_orm::DatabaseConnection;

use crate::{
    model::support::TicketStatus,
    server::{
        data::{
            support::{SupportTicketRepository, TicketMessageRepository},
            user::UserRepository,
        },
        email::EmailSender,
        error::{auth::AuthError, AppError},
        middleware::auth::{CurrentUser, Permission},
        model::{
            support::{
                CreateTicketParam, SupportTicket, SupportTicketDetail, TicketMessage,
                TicketSearchParam,
            },
            Paginated,
        },
        service::notifier::Notifier,
    },
};

pub struct SupportService<'a> {
    db: &'a DatabaseConnection,
    email: &'a dyn EmailSender,
}

impl<'a> SupportService<'a> {
    pub fn new(db: &'a DatabaseConnection, email: &'a dyn EmailSender) -> Self {
        Self { db, email }
    }

    pub async fn create(&self, param: CreateTicketParam) -> Result<SupportTicket, AppError> {
        let ticket = SupportTicketRepository::new(self.db).create(param).await?;

        tracing::info!("User {} opened ticket {}", ticket.user_id, ticket.id);

        Ok(ticket)
    }

    /// Own tickets, or every ticket for support staff.
    pub async fn list(
        &self,
        current: &CurrentUser,
        status: Option<TicketStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<SupportTicket>, AppError> {
        let user_id = if current.satisfies(Permission::Support) {
            None
        } else {
            Some(current.id())
        };

        let (tickets, total) = SupportTicketRepository::new(self.db)
            .search_paginated(&TicketSearchParam {
                user_id,
                status,
                page,
                per_page,
            })
            .await?;

        Ok(Paginated::new(tickets, total, page, per_page))
    }

    /// A ticket with its conversation.
    pub async fn get(
        &self,
        current: &CurrentUser,
        id: i32,
    ) -> Result<SupportTicketDetail, AppError> {
        let ticket = self.find_accessible(current, id).await?;
        let messages = TicketMessageRepository::new(self.db)
            .list_by_ticket(id)
            .await?;

        Ok(SupportTicketDetail { ticket, messages })
    }

    /// Appends a message from the owner or a support agent.
    ///
    /// # Returns
    /// - `Ok(TicketMessage)` - Stored message
    /// - `Err(AppError::BadRequest)` - Ticket is closed
    pub async fn add_message(
        &self,
        current: &CurrentUser,
        id: i32,
        message: String,
    ) -> Result<TicketMessage, AppError> {
        let ticket = self.find_accessible(current, id).await?;

        if ticket.status == TicketStatus::Closed {
            return Err(AppError::BadRequest(
                "Closed tickets do not accept messages".to_string(),
            ));
        }

        let message = TicketMessageRepository::new(self.db)
            .create(id, current.id(), message)
            .await?;
        SupportTicketRepository::new(self.db).touch(id).await?;

        Ok(message)
    }

    /// Changes the status and lets the owner know by email.
    pub async fn set_status(&self, id: i32, status: TicketStatus) -> Result<SupportTicket, AppError> {
        let repo = SupportTicketRepository::new(self.db);

        if !repo.set_status(id, status).await? {
            return Err(AppError::NotFound("Ticket not found".to_string()));
        }

        let ticket = self.find(id).await?;
        self.notify_owner(&ticket).await?;

        Ok(ticket)
    }

    /// Hands a ticket to an agent. An `open` ticket moves to `in_progress`.
    pub async fn assign(&self, id: i32, assignee_id: i32) -> Result<SupportTicket, AppError> {
        let ticket = self.find(id).await?;

        if UserRepository::new(self.db)
            .find_active_by_id(assignee_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Assignee not found".to_string()));
        }

        let status = match ticket.status {
            TicketStatus::Open => TicketStatus::InProgress,
            other => other,
        };

        SupportTicketRepository::new(self.db)
            .assign(id, assignee_id, status)
            .await?;

        let updated = self.find(id).await?;
        if updated.status != ticket.status {
            self.notify_owner(&updated).await?;
        }

        Ok(updated)
    }

    pub async fn delete(&self, current: &CurrentUser, id: i32) -> Result<(), AppError> {
        self.find_accessible(current, id).await?;

        if !SupportTicketRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("Ticket not found".to_string()));
        }

        Ok(())
    }

    async fn notify_owner(&self, ticket: &SupportTicket) -> Result<(), AppError> {
        if let Some(owner) = UserRepository::new(self.db)
            .find_active_by_id(ticket.user_id)
            .await?
        {
            Notifier::new(self.email)
                .ticket_status_changed(&owner, ticket)
                .await;
        }

        Ok(())
    }

    async fn find(&self, id: i32) -> Result<SupportTicket, AppError> {
        SupportTicketRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
    }

    async fn find_accessible(
        &self,
        current: &CurrentUser,
        id: i32,
    ) -> Result<SupportTicket, AppError> {
        let ticket = self.find(id).await?;

        if ticket.user_id != current.id() && !current.satisfies(Permission::Support) {
            return Err(AuthError::AccessDenied(
                current.id(),
                format!("accessing ticket {} of another user", id),
            )
            .into());
        }

        Ok(ticket)
    }
}
