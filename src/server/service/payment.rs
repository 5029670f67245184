use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::order::OrderStatus,
    server::{
        data::{
            library::LibraryRepository, order::OrderRepository, payment::PaymentRepository,
            user::UserRepository,
        },
        email::EmailSender,
        error::{auth::AuthError, AppError},
        middleware::auth::CurrentUser,
        model::{audit::AuditEntry, order::Order, payment::Payment},
        service::{audit::AuditLogService, notifier::Notifier},
    },
};

/// Payment lifecycle for orders.
///
/// The payment provider is external: clients report the provider's transaction id
/// through `confirm`, or the failure reason through `fail`.
pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    email: &'a dyn EmailSender,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection, email: &'a dyn EmailSender) -> Self {
        Self { db, email }
    }

    /// Starts paying a pending order, reusing a pending payment when one exists.
    ///
    /// # Returns
    /// - `Ok(Payment)` - Pending payment for the order total
    /// - `Err(AppError::NotFound)` - Order missing
    /// - `Err(AuthError::AccessDenied)` - Order belongs to someone else
    /// - `Err(AppError::BadRequest)` - Order is not pending
    pub async fn create(
        &self,
        current: &CurrentUser,
        order_id: i32,
        provider: &str,
    ) -> Result<Payment, AppError> {
        let order = self.find_order(order_id).await?;

        if order.user_id != current.id() {
            return Err(AuthError::AccessDenied(
                current.id(),
                format!("paying order {} of another user", order_id),
            )
            .into());
        }
        if order.status != OrderStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending orders can be paid".to_string(),
            ));
        }

        let repo = PaymentRepository::new(self.db);
        if let Some(existing) = repo.find_pending_by_order(order_id).await? {
            return Ok(existing);
        }

        Ok(repo.create(order_id, order.total_cents, provider).await?)
    }

    /// Settles a pending payment.
    ///
    /// In one transaction the payment becomes `completed`, the order `paid`, and every
    /// game of the order is added to the buyer's library. A receipt is mailed after
    /// commit. Rejected confirmations are written to the audit log.
    pub async fn confirm(
        &self,
        current: &CurrentUser,
        id: i32,
        transaction_id: &str,
    ) -> Result<Payment, AppError> {
        let (payment, order) = self.find_accessible(current, id).await?;

        if let Err(err) = self.settle(&payment, &order, transaction_id).await {
            AuditLogService::new(self.db)
                .record_best_effort(
                    AuditEntry::new(current.id(), "payment.confirm_failed", "payment", id)
                        .details(err.to_string()),
                )
                .await;
            return Err(err);
        }

        tracing::info!("Payment {} completed for order {}", id, order.id);

        if let Some(buyer) = UserRepository::new(self.db).find_by_id(order.user_id).await? {
            let paid = Order {
                status: OrderStatus::Paid,
                ..order
            };
            Notifier::new(self.email).order_paid(&buyer, &paid).await;
        }

        self.find_payment(id).await
    }

    async fn settle(
        &self,
        payment: &Payment,
        order: &Order,
        transaction_id: &str,
    ) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        if !PaymentRepository::new(&txn)
            .complete(payment.id, transaction_id)
            .await?
        {
            return Err(AppError::BadRequest("Payment is not pending".to_string()));
        }

        if !OrderRepository::new(&txn)
            .transition(order.id, OrderStatus::Pending, OrderStatus::Paid)
            .await?
        {
            return Err(AppError::BadRequest(
                "Order is not awaiting payment".to_string(),
            ));
        }

        let library = LibraryRepository::new(&txn);
        for item in &order.items {
            library
                .grant(order.user_id, item.game_id, Some(order.id))
                .await?;
        }

        txn.commit().await?;

        Ok(())
    }

    pub async fn fail(
        &self,
        current: &CurrentUser,
        id: i32,
        reason: &str,
    ) -> Result<Payment, AppError> {
        self.find_accessible(current, id).await?;

        if !PaymentRepository::new(self.db).fail(id, reason).await? {
            return Err(AppError::BadRequest("Payment is not pending".to_string()));
        }

        self.find_payment(id).await
    }

    /// Refunds a completed payment and takes back the games its order granted.
    pub async fn refund(&self, actor_id: i32, id: i32) -> Result<Payment, AppError> {
        let payment = self.find_payment(id).await?;

        let txn = self.db.begin().await?;

        if !PaymentRepository::new(&txn).refund(id).await? {
            return Err(AppError::BadRequest(
                "Only completed payments can be refunded".to_string(),
            ));
        }

        if !OrderRepository::new(&txn)
            .transition(payment.order_id, OrderStatus::Paid, OrderStatus::Refunded)
            .await?
        {
            return Err(AppError::BadRequest("Order is not paid".to_string()));
        }

        let revoked = LibraryRepository::new(&txn)
            .revoke_by_order(payment.order_id)
            .await?;

        AuditLogService::new(&txn)
            .record(
                AuditEntry::new(actor_id, "payment.refund", "payment", id).details(format!(
                    "order {} refunded, {} library entries revoked",
                    payment.order_id, revoked
                )),
            )
            .await?;

        txn.commit().await?;

        tracing::info!("Payment {} refunded by {}", id, actor_id);

        self.find_payment(id).await
    }

    /// A payment visible to the order owner or an admin.
    pub async fn get(&self, current: &CurrentUser, id: i32) -> Result<Payment, AppError> {
        let (payment, _) = self.find_accessible(current, id).await?;
        Ok(payment)
    }

    async fn find_accessible(
        &self,
        current: &CurrentUser,
        id: i32,
    ) -> Result<(Payment, Order), AppError> {
        let payment = self.find_payment(id).await?;
        let order = self.find_order(payment.order_id).await?;

        if order.user_id != current.id() && !current.is_admin() {
            return Err(AuthError::AccessDenied(
                current.id(),
                format!("accessing payment {} of another user", id),
            )
            .into());
        }

        Ok((payment, order))
    }

    async fn find_payment(&self, id: i32) -> Result<Payment, AppError> {
        PaymentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))
    }

    async fn find_order(&self, id: i32) -> Result<Order, AppError> {
        OrderRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }
}

