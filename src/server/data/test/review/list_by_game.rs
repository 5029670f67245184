use super::*;

/// Tests that listed reviews carry their author's username and duplicate
/// detection works per user.
///
/// Expected: Ok with one review by "critic" and exists_for_user true only for them
#[tokio::test]
async fn lists_reviews_with_usernames() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let critic = factory::user::UserFactory::new(db)
        .username("critic")
        .build()
        .await?;

    let repo = ReviewRepository::new(db);
    repo.create(CreateReviewParam {
        game_id: game.id,
        user_id: critic.id,
        rating: 3,
        content: "Fine".to_string(),
    })
    .await?;

    let (reviews, total) = repo.list_by_game(game.id, 0, 10).await?;

    assert_eq!(total, 1);
    assert_eq!(reviews[0].username, "critic");
    assert!(repo.exists_for_user(game.id, critic.id).await?);
    assert!(!repo.exists_for_user(game.id, developer.id).await?);

    Ok(())
}
