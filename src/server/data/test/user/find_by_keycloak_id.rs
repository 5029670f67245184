use super::*;

/// Tests resolving a user from a token subject.
///
/// Expected: Ok(Some) for a known subject, Ok(None) for an unknown one
#[tokio::test]
async fn finds_user_by_subject() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .keycloak_id("kc-subject")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let found = repo.find_by_keycloak_id("kc-subject").await?;
    let missing = repo.find_by_keycloak_id("kc-unknown").await?;

    assert_eq!(found.map(|u| u.id), Some(created.id));
    assert!(missing.is_none());

    Ok(())
}

/// Tests that soft-deleted users are still returned by subject lookup.
///
/// The auth guard needs the row to refuse the account rather than recreate it.
///
/// Expected: Ok(Some) with is_deleted set
#[tokio::test]
async fn returns_deleted_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .keycloak_id("kc-gone")
        .deleted(true)
        .build()
        .await?;

    let found = UserRepository::new(db)
        .find_by_keycloak_id("kc-gone")
        .await?
        .unwrap();

    assert!(found.is_deleted);

    Ok(())
}
