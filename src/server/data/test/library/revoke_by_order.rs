use super::*;

/// Tests that refunding an order removes exactly the entries it granted.
///
/// Expected: 1 entry removed, the separately granted game stays owned
#[tokio::test]
async fn revokes_only_order_entries() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_user(db).await?;
    let (developer, bought) = factory::helpers::create_published_game(db).await?;
    let gifted = factory::game::GameFactory::new(db, developer.id)
        .published(true)
        .build()
        .await?;
    let order = factory::order::OrderFactory::new(db, buyer.id)
        .status("paid")
        .item(bought.id, bought.price_cents)
        .build()
        .await?;

    factory::library_entry::LibraryEntryFactory::new(db, buyer.id, bought.id)
        .order_id(order.id)
        .build()
        .await?;
    factory::library_entry::LibraryEntryFactory::new(db, buyer.id, gifted.id)
        .build()
        .await?;

    let repo = LibraryRepository::new(db);
    assert_eq!(repo.revoke_by_order(order.id).await?, 1);
    assert!(!repo.owns(buyer.id, bought.id).await?);
    assert!(repo.owns(buyer.id, gifted.id).await?);

    Ok(())
}
