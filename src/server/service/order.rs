use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::order::OrderStatus,
    server::{
        data::{cart::CartRepository, library::LibraryRepository, order::OrderRepository},
        error::{auth::AuthError, AppError},
        middleware::auth::CurrentUser,
        model::{
            order::{Order, OrderItem},
            Paginated,
        },
    },
};

pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Turns the user's cart into a pending order and empties the cart.
    ///
    /// Runs in one transaction; any failure leaves cart and orders untouched.
    ///
    /// # Returns
    /// - `Ok(Order)` - Pending order holding every cart item at its snapshotted price
    /// - `Err(AppError::BadRequest)` - Cart is empty or holds an already owned game
    pub async fn checkout(&self, user_id: i32) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;

        let carts = CartRepository::new(&txn);
        let cart_id = carts.get_or_create(user_id).await?;
        let cart = carts.items(cart_id).await?;

        if cart.items.is_empty() {
            return Err(AppError::BadRequest("Your cart is empty".to_string()));
        }

        let library = LibraryRepository::new(&txn);
        for item in &cart.items {
            if library.owns(user_id, item.game_id).await? {
                return Err(AppError::BadRequest(format!(
                    "You already own '{}'",
                    item.title
                )));
            }
        }

        let items: Vec<OrderItem> = cart
            .items
            .iter()
            .map(|item| OrderItem {
                game_id: item.game_id,
                price_cents: item.price_cents,
            })
            .collect();

        let order = OrderRepository::new(&txn).create(user_id, &items).await?;
        carts.clear(cart_id).await?;

        txn.commit().await?;

        tracing::info!(
            "User {} checked out order {} ({} cents)",
            user_id,
            order.id,
            order.total_cents
        );

        Ok(order)
    }

    pub async fn list_own(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Order>, AppError> {
        let (orders, total) = OrderRepository::new(self.db)
            .list_paginated(Some(user_id), None, page, per_page)
            .await?;

        Ok(Paginated::new(orders, total, page, per_page))
    }

    pub async fn list_all(
        &self,
        status: Option<OrderStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Order>, AppError> {
        let (orders, total) = OrderRepository::new(self.db)
            .list_paginated(None, status, page, per_page)
            .await?;

        Ok(Paginated::new(orders, total, page, per_page))
    }

    /// An order visible to its owner or an admin.
    pub async fn get(&self, current: &CurrentUser, id: i32) -> Result<Order, AppError> {
        let order = OrderRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.user_id != current.id() && !current.is_admin() {
            return Err(AuthError::AccessDenied(
                current.id(),
                format!("viewing order {} of another user", id),
            )
            .into());
        }

        Ok(order)
    }

    pub async fn cancel(&self, current: &CurrentUser, id: i32) -> Result<Order, AppError> {
        self.get(current, id).await?;

        let repo = OrderRepository::new(self.db);
        if !repo
            .transition(id, OrderStatus::Pending, OrderStatus::Cancelled)
            .await?
        {
            return Err(AppError::BadRequest(
                "Only pending orders can be cancelled".to_string(),
            ));
        }

        repo.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }
}
