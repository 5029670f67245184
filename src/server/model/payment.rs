use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::payment::{PaymentDto, PaymentStatus},
    server::model::parse_status,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub order_id: i32,
    pub amount_cents: i64,
    /// Name of the payment provider the client used, e.g. `stripe`.
    pub provider: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn from_entity(entity: entity::payment::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            order_id: entity.order_id,
            amount_cents: entity.amount_cents,
            provider: entity.provider,
            status: parse_status(&entity.status)?,
            transaction_id: entity.transaction_id,
            failure_reason: entity.failure_reason,
            created_at: entity.created_at,
            completed_at: entity.completed_at,
        })
    }

    pub fn into_dto(self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            order_id: self.order_id,
            amount_cents: self.amount_cents,
            provider: self.provider,
            status: self.status,
            transaction_id: self.transaction_id,
            failure_reason: self.failure_reason,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}
