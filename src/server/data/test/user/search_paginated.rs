use super::*;

/// Tests paginated listing ordered by username.
///
/// Expected: Ok with 3 users total and the first page holding the two
/// alphabetically first usernames
#[tokio::test]
async fn paginates_in_username_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["charlie", "alpha", "bravo"] {
        factory::user::UserFactory::new(db).username(name).build().await?;
    }

    let (users, total) = UserRepository::new(db).search_paginated(None, 0, 2).await?;

    assert_eq!(total, 3);
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alpha", "bravo"]);

    Ok(())
}

/// Tests the username search filter and that deleted users are hidden.
///
/// Expected: Ok with only the active matching user
#[tokio::test]
async fn filters_by_search_and_hides_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db).username("smith_one").build().await?;
    factory::user::UserFactory::new(db)
        .username("smith_two")
        .deleted(true)
        .build()
        .await?;
    factory::user::UserFactory::new(db).username("jones").build().await?;

    let (users, total) = UserRepository::new(db)
        .search_paginated(Some("smith"), 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].username, "smith_one");

    Ok(())
}
