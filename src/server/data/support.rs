//! Support ticket and ticket message repositories.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::support::TicketStatus,
    server::model::support::{CreateTicketParam, SupportTicket, TicketMessage, TicketSearchParam},
};

pub struct SupportTicketRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SupportTicketRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Opens a new ticket.
    pub async fn create(&self, param: CreateTicketParam) -> Result<SupportTicket, DbErr> {
        let now = Utc::now();

        let entity = entity::support_ticket::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            subject: ActiveValue::Set(param.subject),
            description: ActiveValue::Set(param.description),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            priority: ActiveValue::Set(param.priority.as_str().to_string()),
            assigned_to: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        SupportTicket::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<SupportTicket>, DbErr> {
        entity::prelude::SupportTicket::find_by_id(id)
            .filter(entity::support_ticket::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?
            .map(SupportTicket::from_entity)
            .transpose()
    }

    /// Live tickets newest first, filtered by owner and status when given.
    ///
    /// # Returns
    /// - `Ok((tickets, total))` - Tickets for the requested page and total matching count
    /// - `Err(DbErr)` - Database error
    pub async fn search_paginated(
        &self,
        param: &TicketSearchParam,
    ) -> Result<(Vec<SupportTicket>, u64), DbErr> {
        let mut query = entity::prelude::SupportTicket::find()
            .filter(entity::support_ticket::Column::IsDeleted.eq(false))
            .order_by_desc(entity::support_ticket::Column::CreatedAt)
            .order_by_desc(entity::support_ticket::Column::Id);

        if let Some(user_id) = param.user_id {
            query = query.filter(entity::support_ticket::Column::UserId.eq(user_id));
        }
        if let Some(status) = param.status {
            query = query.filter(entity::support_ticket::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(self.db, param.per_page);
        let total = paginator.num_items().await?;
        let tickets = paginator
            .fetch_page(param.page)
            .await?
            .into_iter()
            .map(SupportTicket::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((tickets, total))
    }

    pub async fn set_status(&self, id: i32, status: TicketStatus) -> Result<bool, DbErr> {
        let result = entity::prelude::SupportTicket::update_many()
            .filter(entity::support_ticket::Column::Id.eq(id))
            .filter(entity::support_ticket::Column::IsDeleted.eq(false))
            .col_expr(entity::support_ticket::Column::Status, Expr::value(status.as_str()))
            .col_expr(entity::support_ticket::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn assign(&self, id: i32, assignee_id: i32, status: TicketStatus) -> Result<bool, DbErr> {
        let result = entity::prelude::SupportTicket::update_many()
            .filter(entity::support_ticket::Column::Id.eq(id))
            .filter(entity::support_ticket::Column::IsDeleted.eq(false))
            .col_expr(entity::support_ticket::Column::AssignedTo, Expr::value(assignee_id))
            .col_expr(entity::support_ticket::Column::Status, Expr::value(status.as_str()))
            .col_expr(entity::support_ticket::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn touch(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::SupportTicket::update_many()
            .filter(entity::support_ticket::Column::Id.eq(id))
            .col_expr(entity::support_ticket::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::SupportTicket::update_many()
            .filter(entity::support_ticket::Column::Id.eq(id))
            .filter(entity::support_ticket::Column::IsDeleted.eq(false))
            .col_expr(entity::support_ticket::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::support_ticket::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

pub struct TicketMessageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TicketMessageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ticket_id: i32,
        author_id: i32,
        message: String,
    ) -> Result<TicketMessage, DbErr> {
        let entity = entity::ticket_message::ActiveModel {
            ticket_id: ActiveValue::Set(ticket_id),
            author_id: ActiveValue::Set(author_id),
            message: ActiveValue::Set(message),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(TicketMessage::from_entity(entity))
    }

    /// Messages of a ticket in the order they were written.
    pub async fn list_by_ticket(&self, ticket_id: i32) -> Result<Vec<TicketMessage>, DbErr> {
        let entities = entity::prelude::TicketMessage::find()
            .filter(entity::ticket_message::Column::TicketId.eq(ticket_id))
            .order_by_asc(entity::ticket_message::Column::CreatedAt)
            .order_by_asc(entity::ticket_message::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(TicketMessage::from_entity).collect())
    }
}
