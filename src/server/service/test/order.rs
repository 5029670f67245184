use super::*;
use crate::{
    model::order::OrderStatus,
    server::{
        data::library::LibraryRepository,
        service::{cart::CartService, order::OrderService},
    },
};

/// Tests that checkout turns the cart into a pending order and empties it.
///
/// Expected: one-item order at the snapshotted price, empty cart afterwards
#[tokio::test]
async fn checkout_moves_cart_into_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, game) = factory::helpers::create_published_game(db).await?;
    let buyer = factory::create_user(db).await?;

    CartService::new(db).add(buyer.id, game.id).await?;
    let order = OrderService::new(db).checkout(buyer.id).await?;

    assert_eq!(order.user_id, buyer.id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_cents, game.price_cents);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].game_id, game.id);

    assert!(CartService::new(db).get(buyer.id).await?.items.is_empty());

    Ok(())
}

/// Tests checkout with nothing in the cart.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn checkout_rejects_empty_cart() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_user(db).await?;
    let result = OrderService::new(db).checkout(buyer.id).await;

    assert!(is_bad_request(&result));

    Ok(())
}

/// Tests that a game acquired after it was put in the cart blocks checkout.
///
/// Expected: Err(BadRequest) and the cart keeps its item
#[tokio::test]
async fn checkout_rejects_owned_game() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, game) = factory::helpers::create_published_game(db).await?;
    let buyer = factory::create_user(db).await?;

    CartService::new(db).add(buyer.id, game.id).await?;
    LibraryRepository::new(db).grant(buyer.id, game.id, None).await?;

    let result = OrderService::new(db).checkout(buyer.id).await;
    assert!(is_bad_request(&result));

    assert_eq!(CartService::new(db).get(buyer.id).await?.items.len(), 1);

    Ok(())
}

/// Tests cancelling orders and reading someone else's order.
///
/// Expected: pending order cancels once, second cancel is 400, stranger gets 403
#[tokio::test]
async fn cancel_only_pending() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, game) = factory::helpers::create_published_game(db).await?;
    let buyer = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let order = factory::order::OrderFactory::new(db, buyer.id)
        .item(game.id, game.price_cents)
        .build()
        .await?;

    let buyer = caller(buyer, &[]);
    let stranger = caller(stranger, &[]);
    let service = OrderService::new(db);

    assert!(is_access_denied(&service.get(&stranger, order.id).await));

    let cancelled = service.cancel(&buyer, order.id).await?;
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    assert!(is_bad_request(&service.cancel(&buyer, order.id).await));

    Ok(())
}
