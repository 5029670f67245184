use bytes::Bytes;
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};

use super::*;
use crate::{
    model::upload::UploadStatus,
    server::{
        data::{game_version::GameVersionRepository, upload::UploadRepository},
        model::upload::chunk_key,
        service::upload::{NewUpload, UploadService},
        storage::{Bucket, StorageService},
        test_support::MemoryStorage,
    },
};

fn new_upload(game_id: i32, total_chunks: i32, total_size: i64) -> NewUpload {
    NewUpload {
        game_id,
        version: "1.0.0".to_string(),
        file_name: "game.bin".to_string(),
        total_chunks,
        total_size,
    }
}

/// Tests the whole upload flow with chunks sent out of order.
///
/// Expected: version recorded with the composed size and hash, parts removed
#[tokio::test]
async fn complete_assembles_chunks() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = MemoryStorage::default();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let developer = caller(developer, &["developer"]);
    let service = UploadService::new(db, &storage);

    let session = service.create(&developer, new_upload(game.id, 2, 10)).await?;
    assert_eq!(session.status, UploadStatus::InProgress);

    service
        .upload_chunk(&developer, &session.id, 1, Bytes::from_static(b"world"))
        .await?;
    let progress = service
        .upload_chunk(&developer, &session.id, 0, Bytes::from_static(b"hello"))
        .await?;
    assert_eq!(progress.uploaded_chunks, 2);
    assert_eq!(storage.count(Bucket::Uploads), 2);

    let version = service
        .complete(&developer, &session.id, Some("first release".to_string()))
        .await?;

    assert_eq!(version.version, "1.0.0");
    assert_eq!(version.file_size, 10);
    assert_eq!(version.file_hash, hex::encode(Sha256::digest(b"helloworld")));
    assert_eq!(version.changelog.as_deref(), Some("first release"));
    assert_eq!(
        storage.object(Bucket::Games, &version.file_key),
        Some(Bytes::from_static(b"helloworld"))
    );
    assert_eq!(storage.count(Bucket::Uploads), 0);

    let finished = UploadRepository::new(db).find_by_id(&session.id).await?.unwrap();
    assert_eq!(finished.status, UploadStatus::Completed);
    assert!(UploadRepository::new(db).chunks(&session.id).await?.is_empty());

    Ok(())
}

/// Tests completing before every chunk arrived, and with a wrong total size.
///
/// Expected: Err(BadRequest) both times, no version created
#[tokio::test]
async fn complete_rejects_incomplete_upload() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = MemoryStorage::default();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let developer = caller(developer, &["developer"]);
    let service = UploadService::new(db, &storage);

    let session = service.create(&developer, new_upload(game.id, 2, 12)).await?;
    service
        .upload_chunk(&developer, &session.id, 0, Bytes::from_static(b"hello"))
        .await?;
    assert!(is_bad_request(&service.complete(&developer, &session.id, None).await));

    service
        .upload_chunk(&developer, &session.id, 1, Bytes::from_static(b"world"))
        .await?;
    assert!(is_bad_request(&service.complete(&developer, &session.id, None).await));

    assert_eq!(GameVersionRepository::new(db).count_by_game(game.id).await?, 0);

    Ok(())
}

/// Tests completion when a stored part no longer matches its recorded size.
///
/// Expected: error, composed binary removed, session still in progress
#[tokio::test]
async fn complete_removes_binary_on_size_mismatch() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = MemoryStorage::default();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let developer = caller(developer, &["developer"]);
    let service = UploadService::new(db, &storage);

    let session = service.create(&developer, new_upload(game.id, 2, 10)).await?;
    service
        .upload_chunk(&developer, &session.id, 0, Bytes::from_static(b"hello"))
        .await?;
    service
        .upload_chunk(&developer, &session.id, 1, Bytes::from_static(b"world"))
        .await?;
    storage
        .put_object(Bucket::Uploads, &chunk_key(&session.id, 1), Bytes::from_static(b"wo"))
        .await?;

    let result = service.complete(&developer, &session.id, None).await;

    assert!(matches!(result, Err(AppError::InternalError(_))));
    assert_eq!(storage.count(Bucket::Games), 0);
    assert_eq!(storage.count(Bucket::Uploads), 2);
    assert_eq!(GameVersionRepository::new(db).count_by_game(game.id).await?, 0);
    let pending = service.get(&developer, &session.id).await?;
    assert_eq!(pending.status, UploadStatus::InProgress);

    Ok(())
}

/// Tests chunk validation and ownership.
///
/// Expected: out-of-range and empty chunks are 400, another user gets 403
#[tokio::test]
async fn rejects_invalid_chunks() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = MemoryStorage::default();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let intruder = factory::create_user(db).await?;
    let developer = caller(developer, &["developer"]);
    let service = UploadService::new(db, &storage);

    let session = service.create(&developer, new_upload(game.id, 2, 10)).await?;

    let out_of_range = service
        .upload_chunk(&developer, &session.id, 2, Bytes::from_static(b"x"))
        .await;
    assert!(is_bad_request(&out_of_range));

    let empty = service
        .upload_chunk(&developer, &session.id, 0, Bytes::new())
        .await;
    assert!(is_bad_request(&empty));

    let foreign = service
        .upload_chunk(&caller(intruder, &[]), &session.id, 0, Bytes::from_static(b"x"))
        .await;
    assert!(is_access_denied(&foreign));

    Ok(())
}

/// Tests opening a session for a version that already exists or is uploading.
///
/// Expected: Err(BadRequest) both times
#[tokio::test]
async fn create_rejects_duplicate_version() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = MemoryStorage::default();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    factory::create_game_version(db, game.id, "0.9.0").await?;
    let developer = caller(developer, &["developer"]);
    let service = UploadService::new(db, &storage);

    let mut released = new_upload(game.id, 1, 1);
    released.version = "0.9.0".to_string();
    assert!(is_bad_request(&service.create(&developer, released).await));

    service.create(&developer, new_upload(game.id, 1, 1)).await?;
    assert!(is_bad_request(
        &service.create(&developer, new_upload(game.id, 1, 1)).await
    ));

    Ok(())
}

/// Tests aborting a session.
///
/// Expected: parts deleted, status aborted, further chunks rejected
#[tokio::test]
async fn abort_discards_parts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = MemoryStorage::default();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let developer = caller(developer, &["developer"]);
    let service = UploadService::new(db, &storage);

    let session = service.create(&developer, new_upload(game.id, 2, 10)).await?;
    service
        .upload_chunk(&developer, &session.id, 0, Bytes::from_static(b"hello"))
        .await?;

    service.abort(&developer, &session.id).await?;

    assert_eq!(storage.count(Bucket::Uploads), 0);
    let aborted = service.get(&developer, &session.id).await?;
    assert_eq!(aborted.status, UploadStatus::Aborted);

    let late = service
        .upload_chunk(&developer, &session.id, 1, Bytes::from_static(b"world"))
        .await;
    assert!(is_bad_request(&late));

    Ok(())
}

/// Tests the cleanup of sessions nobody touched within the TTL.
///
/// Expected: only the idle session is aborted
#[tokio::test]
async fn cleanup_aborts_idle_sessions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_upload_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = MemoryStorage::default();

    let (developer, game) = factory::helpers::create_published_game(db).await?;
    let idle = factory::upload_session::UploadSessionFactory::new(db, developer.id, game.id)
        .updated_at(Utc::now() - Duration::hours(30))
        .build()
        .await?;
    let fresh = factory::upload_session::UploadSessionFactory::new(db, developer.id, game.id)
        .version("2.0.0")
        .build()
        .await?;

    let aborted = UploadService::new(db, &storage).cleanup_stale(24).await?;
    assert_eq!(aborted, 1);

    let repo = UploadRepository::new(db);
    assert_eq!(
        repo.find_by_id(&idle.id).await?.unwrap().status,
        UploadStatus::Aborted
    );
    assert_eq!(
        repo.find_by_id(&fresh.id).await?.unwrap().status,
        UploadStatus::InProgress
    );

    Ok(())
}
