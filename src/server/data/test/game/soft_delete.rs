use super::*;

/// Tests that deleting a game also unpublishes it and hides it from lookups.
///
/// Expected: first delete true, second false, find_by_id returns None
#[tokio::test]
async fn deletes_and_unpublishes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, game) = factory::helpers::create_published_game(db).await?;
    let repo = GameRepository::new(db);

    assert!(repo.soft_delete(game.id).await?);
    assert!(!repo.soft_delete(game.id).await?);
    assert!(repo.find_by_id(game.id).await?.is_none());

    let row = entity::prelude::Game::find_by_id(game.id)
        .one(db)
        .await?
        .unwrap();
    assert!(row.is_deleted);
    assert!(!row.is_published);

    Ok(())
}
