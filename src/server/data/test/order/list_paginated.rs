use super::*;

/// Tests filtering orders by user and status.
///
/// Expected: only the buyer's paid order for the combined filter
#[tokio::test]
async fn filters_by_user_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let (_, game) = factory::helpers::create_published_game(db).await?;

    let paid = factory::order::OrderFactory::new(db, buyer.id)
        .status("paid")
        .item(game.id, 1999)
        .build()
        .await?;
    factory::order::OrderFactory::new(db, buyer.id)
        .item(game.id, 1999)
        .build()
        .await?;
    factory::order::OrderFactory::new(db, other.id)
        .status("paid")
        .item(game.id, 1999)
        .build()
        .await?;

    let repo = OrderRepository::new(db);
    let (orders, total) = repo
        .list_paginated(Some(buyer.id), Some(OrderStatus::Paid), 0, 10)
        .await?;
    assert_eq!(total, 1);
    assert_eq!(orders[0].id, paid.id);
    assert_eq!(orders[0].items.len(), 1);

    let (_, all) = repo.list_paginated(None, None, 0, 10).await?;
    assert_eq!(all, 3);

    Ok(())
}
