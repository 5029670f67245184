use super::*;

/// Tests that a user's cart is created once and reused.
///
/// Expected: both calls return the same cart id
#[tokio::test]
async fn reuses_existing_cart() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = CartRepository::new(db);

    let first = repo.get_or_create(user.id).await?;
    let second = repo.get_or_create(user.id).await?;

    assert_eq!(first, second);

    Ok(())
}

/// Tests adding, totalling and removing cart items.
///
/// Expected: total of both prices, then one item after removal
#[tokio::test]
async fn adds_and_removes_items() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (developer, first) = factory::helpers::create_published_game(db).await?;
    let second = factory::game::GameFactory::new(db, developer.id)
        .price_cents(500)
        .published(true)
        .build()
        .await?;

    let repo = CartRepository::new(db);
    let cart_id = repo.get_or_create(user.id).await?;
    repo.add_item(cart_id, first.id, first.price_cents).await?;
    repo.add_item(cart_id, second.id, second.price_cents).await?;

    let cart = repo.items(cart_id).await?;
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_cents(), first.price_cents + 500);
    assert!(repo.contains(cart_id, second.id).await?);

    assert!(repo.remove_item(cart_id, second.id).await?);
    assert!(!repo.remove_item(cart_id, second.id).await?);
    assert_eq!(repo.items(cart_id).await?.items.len(), 1);

    repo.clear(cart_id).await?;
    assert!(repo.items(cart_id).await?.items.is_empty());

    Ok(())
}
