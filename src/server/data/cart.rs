//! Cart repository.
//!
//! A user has at most one cart row, created on first use. Items snapshot the game
//! price at the moment they are added.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::game::GameRepository,
    model::cart::{Cart, CartItem},
};

pub struct CartRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CartRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns the id of the user's cart, creating the cart if needed.
    pub async fn get_or_create(&self, user_id: i32) -> Result<i32, DbErr> {
        if let Some(cart) = entity::prelude::Cart::find()
            .filter(entity::cart::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        {
            return Ok(cart.id);
        }

        let now = Utc::now();
        let cart = entity::cart::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(cart.id)
    }

    /// Items of a cart, oldest first, joined with current game titles.
    ///
    /// Items whose game has since been deleted are left out.
    pub async fn items(&self, cart_id: i32) -> Result<Cart, DbErr> {
        let entities = entity::prelude::CartItem::find()
            .filter(entity::cart_item::Column::CartId.eq(cart_id))
            .order_by_asc(entity::cart_item::Column::AddedAt)
            .order_by_asc(entity::cart_item::Column::Id)
            .all(self.db)
            .await?;

        let game_ids: Vec<i32> = entities.iter().map(|i| i.game_id).collect();
        let titles: HashMap<i32, String> = GameRepository::new(self.db)
            .find_many(&game_ids)
            .await?
            .into_iter()
            .map(|g| (g.id, g.title))
            .collect();

        let items = entities
            .into_iter()
            .filter_map(|item| {
                titles.get(&item.game_id).map(|title| CartItem {
                    game_id: item.game_id,
                    title: title.clone(),
                    price_cents: item.price_cents,
                    added_at: item.added_at,
                })
            })
            .collect();

        Ok(Cart { items })
    }

    pub async fn contains(&self, cart_id: i32, game_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::CartItem::find()
            .filter(entity::cart_item::Column::CartId.eq(cart_id))
            .filter(entity::cart_item::Column::GameId.eq(game_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn add_item(&self, cart_id: i32, game_id: i32, price_cents: i64) -> Result<(), DbErr> {
        let now = Utc::now();

        entity::cart_item::ActiveModel {
            cart_id: ActiveValue::Set(cart_id),
            game_id: ActiveValue::Set(game_id),
            price_cents: ActiveValue::Set(price_cents),
            added_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.touch(cart_id).await
    }

    /// Removes one game from the cart.
    ///
    /// # Returns
    /// - `Ok(true)` - The game was in the cart
    /// - `Ok(false)` - Nothing to remove
    pub async fn remove_item(&self, cart_id: i32, game_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CartItem::delete_many()
            .filter(entity::cart_item::Column::CartId.eq(cart_id))
            .filter(entity::cart_item::Column::GameId.eq(game_id))
            .exec(self.db)
            .await?;

        if result.rows_affected > 0 {
            self.touch(cart_id).await?;
        }

        Ok(result.rows_affected > 0)
    }

    pub async fn clear(&self, cart_id: i32) -> Result<(), DbErr> {
        entity::prelude::CartItem::delete_many()
            .filter(entity::cart_item::Column::CartId.eq(cart_id))
            .exec(self.db)
            .await?;

        self.touch(cart_id).await
    }

    async fn touch(&self, cart_id: i32) -> Result<(), DbErr> {
        entity::prelude::Cart::update_many()
            .filter(entity::cart::Column::Id.eq(cart_id))
            .col_expr(entity::cart::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
