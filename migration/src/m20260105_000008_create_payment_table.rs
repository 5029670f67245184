use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000007_create_order_tables::Order;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::OrderId))
                    .col(big_integer(Payment::AmountCents))
                    .col(string(Payment::Provider))
                    .col(string(Payment::Status))
                    .col(string_null(Payment::TransactionId))
                    .col(string_null(Payment::FailureReason))
                    .col(timestamp_with_time_zone(Payment::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone_null(Payment::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_order_id")
                            .from(Payment::Table, Payment::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    OrderId,
    AmountCents,
    Provider,
    Status,
    TransactionId,
    FailureReason,
    CreatedAt,
    CompletedAt,
}
