use super::*;
use crate::server::{
    identity::RegistrationRequest,
    service::{auth::AuthService, user::UserService},
    test_support::{FakeIdentity, MemoryStorage, RecordingEmail},
};

/// Tests the follow rules.
///
/// Expected: self-follow 400, duplicate 400, unknown target 404, counts in profile
#[tokio::test]
async fn follow_rules() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = MemoryStorage::default();

    let fan = factory::create_user(db).await?;
    let star = factory::create_user(db).await?;
    let service = UserService::new(db, &storage);

    assert!(is_bad_request(&service.follow(fan.id, fan.id).await));
    assert!(is_not_found(&service.follow(fan.id, 9999).await));

    service.follow(fan.id, star.id).await?;
    assert!(is_bad_request(&service.follow(fan.id, star.id).await));

    let profile = service.get_profile(star.id).await?;
    assert_eq!(profile.follower_count, 1);
    assert_eq!(profile.following_count, 0);

    let followers = service.followers(star.id).await?;
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].id, fan.id);

    service.unfollow(fan.id, star.id).await?;
    assert!(is_not_found(&service.unfollow(fan.id, star.id).await));

    Ok(())
}

/// Tests that registration creates the local user and greets them.
///
/// Expected: user stored with the Keycloak id, welcome email, duplicate username 400
#[tokio::test]
async fn register_creates_local_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let identity = FakeIdentity::default();
    let email = RecordingEmail::default();
    let service = AuthService::new(db, &identity, &email);

    let request = RegistrationRequest {
        username: "smith".to_string(),
        email: "smith@example.com".to_string(),
        password: "correct horse".to_string(),
        display_name: Some("Smith".to_string()),
    };

    let user = service.register(request.clone()).await?;
    assert_eq!(user.keycloak_id, "kc-smith");
    assert_eq!(user.username, "smith");

    let sent = email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "smith@example.com");

    assert!(is_bad_request(&service.register(request).await));

    let tokens = service.login("smith", "correct horse").await?;
    assert_eq!(tokens.access_token, "access-smith");

    Ok(())
}

/// Tests deleting a user as an admin.
///
/// Expected: user hidden afterwards, second delete 404
#[tokio::test]
async fn delete_user_is_soft() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::UserFollow)
        .with_table(entity::prelude::AuditLog)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = MemoryStorage::default();

    let admin = factory::create_user(db).await?;
    let target = factory::create_user(db).await?;
    let service = UserService::new(db, &storage);

    service.delete(admin.id, target.id).await?;

    assert!(is_not_found(&service.get_profile(target.id).await));
    assert!(is_not_found(&service.delete(admin.id, target.id).await));

    Ok(())
}
