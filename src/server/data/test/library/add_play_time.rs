use super::*;

/// Tests accumulating play time for an owned game.
///
/// Expected: counter sums both sessions and last_played_at is set
#[tokio::test]
async fn accumulates_play_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (buyer, game, _) = factory::helpers::create_owned_game(db).await?;
    let repo = LibraryRepository::new(db);

    assert!(repo.add_play_time(buyer.id, game.id, 90).await?);
    assert!(repo.add_play_time(buyer.id, game.id, 30).await?);

    let entry = repo.find(buyer.id, game.id).await?.unwrap();
    assert_eq!(entry.play_time_seconds, 120);
    assert!(entry.last_played_at.is_some());

    Ok(())
}

/// Tests reporting play time for a game the user does not own.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_unowned_game() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stranger = factory::create_user(db).await?;
    let (_, game) = factory::helpers::create_published_game(db).await?;

    assert!(!LibraryRepository::new(db).add_play_time(stranger.id, game.id, 60).await?);

    Ok(())
}
