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
                    .table(AnalyticsSession::Table)
                    .if_not_exists()
                    .col(pk_auto(AnalyticsSession::Id))
                    .col(integer_null(AnalyticsSession::UserId))
                    .col(string(AnalyticsSession::Platform))
                    .col(string_null(AnalyticsSession::AppVersion))
                    .col(
                        timestamp_with_time_zone(AnalyticsSession::StartedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(AnalyticsSession::EndedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_analytics_session_user_id")
                            .from(AnalyticsSession::Table, AnalyticsSession::UserId)
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
                    .table(AnalyticsEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(AnalyticsEvent::Id))
                    .col(integer_null(AnalyticsEvent::SessionId))
                    .col(integer_null(AnalyticsEvent::UserId))
                    .col(string(AnalyticsEvent::EventType))
                    .col(text_null(AnalyticsEvent::Payload))
                    .col(
                        timestamp_with_time_zone(AnalyticsEvent::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_analytics_event_session_id")
                            .from(AnalyticsEvent::Table, AnalyticsEvent::SessionId)
                            .to(AnalyticsSession::Table, AnalyticsSession::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_analytics_event_user_id")
                            .from(AnalyticsEvent::Table, AnalyticsEvent::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_analytics_event_type")
                    .table(AnalyticsEvent::Table)
                    .col(AnalyticsEvent::EventType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AnalyticsEvent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnalyticsSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AnalyticsSession {
    Table,
    Id,
    UserId,
    Platform,
    AppVersion,
    StartedAt,
    EndedAt,
}

#[derive(DeriveIden)]
pub enum AnalyticsEvent {
    Table,
    Id,
    SessionId,
    UserId,
    EventType,
    Payload,
    CreatedAt,
}
