use super::*;

/// Tests that re-sending a chunk replaces it instead of counting twice.
///
/// Expected: distinct count stays 1 after a resend, then 2; stored size is the latest
#[tokio::test]
async fn counts_distinct_chunks() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let session = factory::upload_session::UploadSessionFactory::new(db, developer.id, game.id)
        .build()
        .await?;

    let repo = UploadRepository::new(db);
    assert_eq!(repo.record_chunk(&session.id, 0, 3).await?, 1);
    assert_eq!(repo.record_chunk(&session.id, 0, 4).await?, 1);
    assert_eq!(repo.record_chunk(&session.id, 1, 4).await?, 2);

    assert_eq!(repo.chunks(&session.id).await?, vec![(0, 4), (1, 4)]);

    let stored = repo.find_by_id(&session.id).await?.unwrap();
    assert_eq!(stored.uploaded_chunks, 2);

    repo.delete_chunks(&session.id).await?;
    assert!(repo.chunks(&session.id).await?.is_empty());

    Ok(())
}

/// Tests that a finished session cannot be finished again.
///
/// Expected: first finish true, second false, status completed
#[tokio::test]
async fn finishes_in_progress_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let session = factory::upload_session::UploadSessionFactory::new(db, developer.id, game.id)
        .version("3.1.0")
        .build()
        .await?;

    let repo = UploadRepository::new(db);
    assert!(repo.in_progress_exists(game.id, "3.1.0").await?);
    assert!(repo.finish(&session.id, UploadStatus::Completed).await?);
    assert!(!repo.finish(&session.id, UploadStatus::Aborted).await?);
    assert!(!repo.in_progress_exists(game.id, "3.1.0").await?);

    let stored = repo.find_by_id(&session.id).await?.unwrap();
    assert_eq!(stored.status, UploadStatus::Completed);

    Ok(())
}
