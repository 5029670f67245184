use super::*;

/// Tests selecting in-progress sessions idle since before the cutoff.
///
/// Expected: only the old in-progress session is returned
#[tokio::test]
async fn finds_idle_in_progress_sessions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let old = Utc::now() - Duration::hours(48);

    let stale = factory::upload_session::UploadSessionFactory::new(db, developer.id, game.id)
        .updated_at(old)
        .build()
        .await?;
    factory::upload_session::UploadSessionFactory::new(db, developer.id, game.id)
        .status("aborted")
        .updated_at(old)
        .build()
        .await?;
    factory::upload_session::UploadSessionFactory::new(db, developer.id, game.id)
        .build()
        .await?;

    let cutoff = Utc::now() - Duration::hours(24);
    let found = UploadRepository::new(db).find_stale(cutoff).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, stale.id);

    Ok(())
}
