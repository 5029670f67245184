use super::*;

/// Tests averaging ratings while ignoring deleted reviews.
///
/// Expected: Ok(Some(4.5)) from ratings 4 and 5 with a deleted 1 excluded
#[tokio::test]
async fn averages_live_reviews() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, game) = factory::helpers::create_published_game(db).await?;
    let repo = ReviewRepository::new(db);

    let mut ids = Vec::new();
    for rating in [4, 5, 1] {
        let user = factory::create_user(db).await?;
        let review = repo
            .create(CreateReviewParam {
                game_id: game.id,
                user_id: user.id,
                rating,
                content: "Solid".to_string(),
            })
            .await?;
        ids.push(review.id);
    }
    repo.soft_delete(ids[2]).await?;

    assert_eq!(repo.average_rating(game.id).await?, Some(4.5));

    Ok(())
}

/// Tests a game with no reviews.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_reviews() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, game) = factory::helpers::create_published_game(db).await?;

    assert_eq!(ReviewRepository::new(db).average_rating(game.id).await?, None);

    Ok(())
}
