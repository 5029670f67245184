use super::*;

/// Tests soft deleting a user twice.
///
/// Expected: first call returns true, second returns false, row is kept but
/// no longer found by `find_active_by_id`
#[tokio::test]
async fn soft_deletes_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    assert!(repo.soft_delete(user.id).await?);
    assert!(!repo.soft_delete(user.id).await?);
    assert!(repo.find_active_by_id(user.id).await?.is_none());
    assert!(repo.find_by_id(user.id).await?.unwrap().is_deleted);

    Ok(())
}
