use super::*;

fn search(search: Option<&str>, genre: Option<&str>) -> GameSearchParam {
    GameSearchParam {
        search: search.map(str::to_string),
        genre: genre.map(str::to_string),
        page: 0,
        per_page: 20,
    }
}

/// Tests that only published, non-deleted games are listed.
///
/// Expected: Ok with the single published game
#[tokio::test]
async fn lists_only_published_games() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let developer = factory::create_user(db).await?;
    let visible = factory::game::GameFactory::new(db, developer.id)
        .published(true)
        .build()
        .await?;
    factory::game::GameFactory::new(db, developer.id).build().await?;
    factory::game::GameFactory::new(db, developer.id)
        .published(true)
        .deleted(true)
        .build()
        .await?;

    let (games, total) = GameRepository::new(db)
        .search_published(&search(None, None))
        .await?;

    assert_eq!(total, 1);
    assert_eq!(games[0].id, visible.id);

    Ok(())
}

/// Tests title search and genre filter together with title ordering.
///
/// Expected: Ok with the two matching RPGs in title order
#[tokio::test]
async fn filters_by_title_and_genre() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let developer = factory::create_user(db).await?;
    for (title, genre) in [
        ("Iron Quest II", "rpg"),
        ("Iron Quest", "rpg"),
        ("Iron Racer", "racing"),
        ("Stone Saga", "rpg"),
    ] {
        factory::game::GameFactory::new(db, developer.id)
            .title(title)
            .genre(genre)
            .published(true)
            .build()
            .await?;
    }

    let (games, total) = GameRepository::new(db)
        .search_published(&search(Some("Iron"), Some("rpg")))
        .await?;

    assert_eq!(total, 2);
    let titles: Vec<_> = games.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Iron Quest", "Iron Quest II"]);

    Ok(())
}
