use super::*;

/// Tests creating an order from priced items.
///
/// Expected: pending order whose total is the sum of item prices
#[tokio::test]
async fn creates_pending_order_with_total() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_user(db).await?;
    let (developer, first) = factory::helpers::create_published_game(db).await?;
    let second = factory::create_game(db, developer.id).await?;

    let items = vec![
        OrderItem { game_id: first.id, price_cents: 1999 },
        OrderItem { game_id: second.id, price_cents: 501 },
    ];
    let order = OrderRepository::new(db).create(buyer.id, &items).await?;

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_cents, 2500);
    assert_eq!(order.items.len(), 2);

    let found = OrderRepository::new(db).find_by_id(order.id).await?.unwrap();
    assert_eq!(found.items.len(), 2);

    Ok(())
}
