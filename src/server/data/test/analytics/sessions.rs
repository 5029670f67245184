use super::*;

/// Tests that ending a session is idempotent.
///
/// Expected: ended_at is set by the first call and unchanged by the second
#[tokio::test]
async fn ends_session_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnalyticsSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AnalyticsRepository::new(db);
    let session = repo
        .start_session(None, "linux".to_string(), Some("0.3.0".to_string()))
        .await?;
    assert!(session.ended_at.is_none());

    repo.end_session(session.id).await?;
    let first = repo.find_session(session.id).await?.unwrap().ended_at;
    repo.end_session(session.id).await?;
    let second = repo.find_session(session.id).await?.unwrap().ended_at;

    assert!(first.is_some());
    assert_eq!(first, second);

    Ok(())
}
