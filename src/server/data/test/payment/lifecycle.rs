use super::*;

/// Tests completing a pending payment and refunding it.
///
/// Expected: completion records the transaction id, refund only succeeds once
#[tokio::test]
async fn completes_then_refunds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_user(db).await?;
    let order = factory::order::OrderFactory::new(db, buyer.id).build().await?;
    let repo = PaymentRepository::new(db);

    let payment = repo.create(order.id, 1999, "manual").await?;
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(
        repo.find_pending_by_order(order.id).await?.map(|p| p.id),
        Some(payment.id)
    );

    assert!(repo.complete(payment.id, "txn-1").await?);
    assert!(!repo.complete(payment.id, "txn-2").await?);

    let completed = repo.find_by_id(payment.id).await?.unwrap();
    assert_eq!(completed.status, PaymentStatus::Completed);
    assert_eq!(completed.transaction_id.as_deref(), Some("txn-1"));
    assert!(completed.completed_at.is_some());
    assert!(repo.find_pending_by_order(order.id).await?.is_none());

    assert!(repo.refund(payment.id).await?);
    assert!(!repo.refund(payment.id).await?);

    Ok(())
}

/// Tests failing a payment and that failed payments cannot be refunded.
///
/// Expected: status failed with the reason stored, refund returns false
#[tokio::test]
async fn fails_pending_payment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_user(db).await?;
    let order = factory::order::OrderFactory::new(db, buyer.id).build().await?;
    let repo = PaymentRepository::new(db);

    let payment = repo.create(order.id, 1999, "manual").await?;
    assert!(repo.fail(payment.id, "card declined").await?);

    let failed = repo.find_by_id(payment.id).await?.unwrap();
    assert_eq!(failed.status, PaymentStatus::Failed);
    assert_eq!(failed.failure_reason.as_deref(), Some("card declined"));
    assert!(!repo.refund(payment.id).await?);

    Ok(())
}
