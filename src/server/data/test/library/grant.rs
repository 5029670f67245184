use super::*;

/// Tests granting a game that is not yet owned.
///
/// Expected: true on first grant, false on the second, entry listed with its title
#[tokio::test]
async fn grants_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_user(db).await?;
    let (_, game) = factory::helpers::create_published_game(db).await?;
    factory::game_version::GameVersionFactory::new(db, game.id)
        .version("2.0.0")
        .build()
        .await?;

    let repo = LibraryRepository::new(db);
    assert!(repo.grant(buyer.id, game.id, None).await?);
    assert!(!repo.grant(buyer.id, game.id, None).await?);
    assert!(repo.owns(buyer.id, game.id).await?);

    let entries = repo.list_by_user(buyer.id).await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, game.title);
    assert_eq!(entries[0].latest_version.as_deref(), Some("2.0.0"));
    assert_eq!(entries[0].play_time_seconds, 0);

    Ok(())
}
