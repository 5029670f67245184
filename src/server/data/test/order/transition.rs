use super::*;

/// Tests that transitions only apply from the expected status.
///
/// Expected: pending -> paid succeeds once, a second attempt is a no-op
#[tokio::test]
async fn transitions_from_expected_status_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_user(db).await?;
    let order = factory::order::OrderFactory::new(db, buyer.id).build().await?;
    let repo = OrderRepository::new(db);

    assert!(repo.transition(order.id, OrderStatus::Pending, OrderStatus::Paid).await?);
    assert!(!repo.transition(order.id, OrderStatus::Pending, OrderStatus::Paid).await?);

    let found = repo.find_by_id(order.id).await?.unwrap();
    assert_eq!(found.status, OrderStatus::Paid);

    Ok(())
}
