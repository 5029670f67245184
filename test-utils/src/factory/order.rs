//! Order factory creating an order together with its items.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating orders. Items are `(game_id, price_cents)` pairs and the
/// total is their sum.
pub struct OrderFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    status: String,
    items: Vec<(i32, i64)>,
}

impl<'a> OrderFactory<'a> {
    /// Defaults to a `pending` order with no items.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            status: "pending".to_string(),
            items: Vec::new(),
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn item(mut self, game_id: i32, price_cents: i64) -> Self {
        self.items.push((game_id, price_cents));
        self
    }

    pub async fn build(self) -> Result<entity::order::Model, DbErr> {
        let now = Utc::now();
        let total: i64 = self.items.iter().map(|(_, price)| price).sum();

        let order = entity::order::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            status: ActiveValue::Set(self.status),
            total_cents: ActiveValue::Set(total),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (game_id, price_cents) in self.items {
            entity::order_item::ActiveModel {
                order_id: ActiveValue::Set(order.id),
                game_id: ActiveValue::Set(game_id),
                price_cents: ActiveValue::Set(price_cents),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(order)
    }
}
