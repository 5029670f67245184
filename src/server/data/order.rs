use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::order::OrderStatus,
    server::model::order::{Order, OrderItem},
};

pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a `pending` order with its items; the total is the sum of item prices.
    ///
    /// # Arguments
    /// - `user_id` - Buyer
    /// - `items` - Games and the prices they are sold at
    ///
    /// # Returns
    /// - `Ok(Order)` - The created order with items
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, user_id: i32, items: &[OrderItem]) -> Result<Order, DbErr> {
        let now = Utc::now();
        let total_cents = items.iter().map(|i| i.price_cents).sum();

        let order = entity::order::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(OrderStatus::Pending.as_str().to_string()),
            total_cents: ActiveValue::Set(total_cents),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut item_entities = Vec::with_capacity(items.len());
        for item in items {
            let entity = entity::order_item::ActiveModel {
                order_id: ActiveValue::Set(order.id),
                game_id: ActiveValue::Set(item.game_id),
                price_cents: ActiveValue::Set(item.price_cents),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            item_entities.push(entity);
        }

        Order::from_entity(order, item_entities)
    }

    async fn load_items(&self, order_id: i32) -> Result<Vec<entity::order_item::Model>, DbErr> {
        entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.eq(order_id))
            .order_by_asc(entity::order_item::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Order>, DbErr> {
        let Some(order) = entity::prelude::Order::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let items = self.load_items(order.id).await?;

        Ok(Some(Order::from_entity(order, items)?))
    }

    /// Orders newest first, optionally restricted to one user and one status.
    ///
    /// # Returns
    /// - `Ok((orders, total))` - Orders for the page with their items, total matching count
    /// - `Err(DbErr)` - Database error
    pub async fn list_paginated(
        &self,
        user_id: Option<i32>,
        status: Option<OrderStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Order>, u64), DbErr> {
        let mut query = entity::prelude::Order::find()
            .order_by_desc(entity::order::Column::CreatedAt)
            .order_by_desc(entity::order::Column::Id);

        if let Some(user_id) = user_id {
            query = query.filter(entity::order::Column::UserId.eq(user_id));
        }
        if let Some(status) = status {
            query = query.filter(entity::order::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        let mut orders = Vec::with_capacity(entities.len());
        for entity in entities {
            let items = self.load_items(entity.id).await?;
            orders.push(Order::from_entity(entity, items)?);
        }

        Ok((orders, total))
    }

    /// Moves an order from `from` to `to`.
    ///
    /// # Returns
    /// - `Ok(true)` - The order was in `from` and has been updated
    /// - `Ok(false)` - The order was not in `from` (nothing changed)
    pub async fn transition(
        &self,
        id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Order::update_many()
            .filter(entity::order::Column::Id.eq(id))
            .filter(entity::order::Column::Status.eq(from.as_str()))
            .col_expr(entity::order::Column::Status, Expr::value(to.as_str()))
            .col_expr(entity::order::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
