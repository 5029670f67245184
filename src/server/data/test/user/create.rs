use super::*;

/// Tests creating a new user.
///
/// Verifies that the repository stores the Keycloak subject, username and email
/// and that the user starts active with an empty profile.
///
/// Expected: Ok with user created and not deleted
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParam {
            keycloak_id: "kc-123".to_string(),
            username: "forgemaster".to_string(),
            email: "forge@example.com".to_string(),
            display_name: Some("Forge Master".to_string()),
        })
        .await?;

    assert_eq!(user.keycloak_id, "kc-123");
    assert_eq!(user.username, "forgemaster");
    assert_eq!(user.display_name.as_deref(), Some("Forge Master"));
    assert!(user.bio.is_none());
    assert!(!user.is_deleted);

    Ok(())
}

/// Tests that usernames are unique.
///
/// Expected: Err when a second user reuses an existing username
#[tokio::test]
async fn rejects_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("taken")
        .build()
        .await?;

    let result = UserRepository::new(db)
        .create(CreateUserParam {
            keycloak_id: "kc-other".to_string(),
            username: "taken".to_string(),
            email: "other@example.com".to_string(),
            display_name: None,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
