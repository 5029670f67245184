use super::*;

/// Tests listing followers newest first without deleted accounts.
///
/// Expected: Ok with the two active followers, most recent first
#[tokio::test]
async fn lists_active_followers() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::UserFollow)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let target = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let gone = factory::user::UserFactory::new(db).deleted(true).build().await?;

    let repo = UserFollowRepository::new(db);
    repo.create(first.id, target.id).await?;
    repo.create(gone.id, target.id).await?;
    repo.create(second.id, target.id).await?;

    let followers = repo.followers(target.id).await?;
    let ids: Vec<_> = followers.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let following = repo.following(first.id).await?;
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].id, target.id);

    Ok(())
}
