use super::*;

/// Tests that the latest version follows version ordering rather than upload order.
///
/// Expected: Ok(Some) with "1.10.0" even though "1.9.0" was uploaded last
#[tokio::test]
async fn picks_highest_version() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, game) = factory::helpers::create_published_game(db).await?;
    for version in ["1.2.0", "1.10.0", "1.9.0"] {
        factory::game_version::GameVersionFactory::new(db, game.id)
            .version(version)
            .build()
            .await?;
    }

    let repo = GameVersionRepository::new(db);
    let latest = repo.latest(game.id).await?.unwrap();

    assert_eq!(latest.version, "1.10.0");
    assert_eq!(repo.count_by_game(game.id).await?, 3);
    assert!(repo.exists(game.id, "1.9.0").await?);
    assert!(!repo.exists(game.id, "2.0.0").await?);

    Ok(())
}

/// Tests a game without versions.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_versions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, game) = factory::helpers::create_published_game(db).await?;

    assert!(GameVersionRepository::new(db).latest(game.id).await?.is_none());

    Ok(())
}
