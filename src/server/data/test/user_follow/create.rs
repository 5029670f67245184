use super::*;

/// Tests creating a follow edge and counting it from both sides.
///
/// Expected: exists is true, follower has 1 following, followed has 1 follower
#[tokio::test]
async fn creates_follow() -> Result<(), DbErr> {
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

    assert!(repo.exists(alice.id, bob.id).await?);
    assert!(!repo.exists(bob.id, alice.id).await?);
    assert_eq!(repo.count_following(alice.id).await?, 1);
    assert_eq!(repo.count_followers(bob.id).await?, 1);
    assert_eq!(repo.count_followers(alice.id).await?, 0);

    Ok(())
}
