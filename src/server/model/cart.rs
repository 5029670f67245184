use chrono::{DateTime, Utc};

use crate::model::cart::{CartDto, CartItemDto};

/// Cart line with the game title and the price captured when it was added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub game_id: i32,
    pub title: String,
    pub price_cents: i64,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn into_dto(self) -> CartItemDto {
        CartItemDto {
            game_id: self.game_id,
            title: self.title,
            price_cents: self.price_cents,
            added_at: self.added_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(|item| item.price_cents).sum()
    }

    pub fn into_dto(self) -> CartDto {
        let total_cents = self.total_cents();

        CartDto {
            items: self.items.into_iter().map(CartItem::into_dto).collect(),
            total_cents,
        }
    }
}
