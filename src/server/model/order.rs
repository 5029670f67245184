use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::order::{OrderDto, OrderItemDto, OrderStatus},
    server::model::parse_status,
};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub game_id: i32,
    pub price_cents: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Builds an order from its row and item rows.
    ///
    /// # Returns
    /// - `Ok(Order)` - Converted order
    /// - `Err(DbErr::Type)` - Stored status is not a known `OrderStatus`
    pub fn from_entity(
        entity: entity::order::Model,
        items: Vec<entity::order_item::Model>,
    ) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            status: parse_status(&entity.status)?,
            total_cents: entity.total_cents,
            items: items
                .into_iter()
                .map(|item| OrderItem {
                    game_id: item.game_id,
                    price_cents: item.price_cents,
                })
                .collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> OrderDto {
        OrderDto {
            id: self.id,
            user_id: self.user_id,
            status: self.status,
            total_cents: self.total_cents,
            items: self
                .items
                .into_iter()
                .map(|item| OrderItemDto {
                    game_id: item.game_id,
                    price_cents: item.price_cents,
                })
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
