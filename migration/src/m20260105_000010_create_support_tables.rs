use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SupportTicket::Table)
                    .if_not_exists()
                    .col(pk_auto(SupportTicket::Id))
                    .col(integer(SupportTicket::UserId))
                    .col(string(SupportTicket::Subject))
                    .col(text(SupportTicket::Description))
                    .col(string(SupportTicket::Status))
                    .col(string(SupportTicket::Priority))
                    .col(integer_null(SupportTicket::AssignedTo))
                    .col(boolean(SupportTicket::IsDeleted).default(false))
                    .col(
                        timestamp_with_time_zone(SupportTicket::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(SupportTicket::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_support_ticket_user_id")
                            .from(SupportTicket::Table, SupportTicket::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_support_ticket_assigned_to")
                            .from(SupportTicket::Table, SupportTicket::AssignedTo)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TicketMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketMessage::Id))
                    .col(integer(TicketMessage::TicketId))
                    .col(integer(TicketMessage::AuthorId))
                    .col(text(TicketMessage::Message))
                    .col(
                        timestamp_with_time_zone(TicketMessage::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_message_ticket_id")
                            .from(TicketMessage::Table, TicketMessage::TicketId)
                            .to(SupportTicket::Table, SupportTicket::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_message_author_id")
                            .from(TicketMessage::Table, TicketMessage::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketMessage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SupportTicket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SupportTicket {
    Table,
    Id,
    UserId,
    Subject,
    Description,
    Status,
    Priority,
    AssignedTo,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum TicketMessage {
    Table,
    Id,
    TicketId,
    AuthorId,
    Message,
    CreatedAt,
}
