use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::{model::payment::PaymentStatus, server::model::payment::Payment};

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        order_id: i32,
        amount_cents: i64,
        provider: &str,
    ) -> Result<Payment, DbErr> {
        let entity = entity::payment::ActiveModel {
            order_id: ActiveValue::Set(order_id),
            amount_cents: ActiveValue::Set(amount_cents),
            provider: ActiveValue::Set(provider.to_string()),
            status: ActiveValue::Set(PaymentStatus::Pending.as_str().to_string()),
            transaction_id: ActiveValue::Set(None),
            failure_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            completed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Payment::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Payment>, DbErr> {
        entity::prelude::Payment::find_by_id(id)
            .one(self.db)
            .await?
            .map(Payment::from_entity)
            .transpose()
    }

    /// Most recent pending payment for an order.
    pub async fn find_pending_by_order(&self, order_id: i32) -> Result<Option<Payment>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::OrderId.eq(order_id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Pending.as_str()))
            .order_by_desc(entity::payment::Column::Id)
            .one(self.db)
            .await?
            .map(Payment::from_entity)
            .transpose()
    }

    /// Marks a pending payment completed.
    ///
    /// # Returns
    /// - `Ok(true)` - Payment was pending and is now completed
    /// - `Ok(false)` - Payment was not pending
    pub async fn complete(&self, id: i32, transaction_id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Payment::update_many()
            .filter(entity::payment::Column::Id.eq(id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Pending.as_str()))
            .col_expr(
                entity::payment::Column::Status,
                Expr::value(PaymentStatus::Completed.as_str()),
            )
            .col_expr(entity::payment::Column::TransactionId, Expr::value(transaction_id))
            .col_expr(entity::payment::Column::CompletedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks a pending payment failed with a reason.
    pub async fn fail(&self, id: i32, reason: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Payment::update_many()
            .filter(entity::payment::Column::Id.eq(id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Pending.as_str()))
            .col_expr(
                entity::payment::Column::Status,
                Expr::value(PaymentStatus::Failed.as_str()),
            )
            .col_expr(entity::payment::Column::FailureReason, Expr::value(reason))
            .col_expr(entity::payment::Column::CompletedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks a completed payment refunded.
    pub async fn refund(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Payment::update_many()
            .filter(entity::payment::Column::Id.eq(id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Completed.as_str()))
            .col_expr(
                entity::payment::Column::Status,
                Expr::value(PaymentStatus::Refunded.as_str()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
