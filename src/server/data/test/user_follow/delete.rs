use super::*;

/// Tests removing a follow edge.
///
/// Expected: true when the edge existed, false when it did not
#[tokio::test]
async fn deletes_existing_follow_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::UserFollow)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;

    let repo = UserFollowRepository::new(db);
    repo.create(alice.id, bob.id).await?;

    assert!(repo.delete(alice.id, bob.id).await?);
    assert!(!repo.delete(alice.id, bob.id).await?);
    assert!(!repo.exists(alice.id, bob.id).await?);

    Ok(())
}
