use super::*;

fn event(session_id: Option<i32>, event_type: &str) -> TrackEventParam {
    TrackEventParam {
        session_id,
        user_id: None,
        event_type: event_type.to_string(),
        payload: Some(serde_json::json!({ "source": "test" })),
    }
}

/// Tests batch insertion, filtering and the summary counts.
///
/// Expected: 3 events stored, 2 "page_view" in the filter, summary sorted by count
#[tokio::test]
async fn records_and_summarizes_events() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AnalyticsSession)
        .with_table(entity::prelude::AnalyticsEvent)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AnalyticsRepository::new(db);
    let session = repo.start_session(None, "windows".to_string(), None).await?;
    let ended = repo.start_session(None, "linux".to_string(), None).await?;
    repo.end_session(ended.id).await?;

    let inserted = repo
        .insert_events(vec![
            event(Some(session.id), "page_view"),
            event(Some(session.id), "page_view"),
            event(None, "purchase"),
        ])
        .await?;
    assert_eq!(inserted, 3);

    let (events, total) = repo
        .search_events(&EventSearchParam {
            event_type: Some("page_view".to_string()),
            session_id: None,
            page: 0,
            per_page: 10,
        })
        .await?;
    assert_eq!(total, 2);
    assert_eq!(
        events[0].payload,
        Some(serde_json::json!({ "source": "test" }))
    );

    let summary = repo.summary().await?;
    assert_eq!(
        summary.event_counts,
        vec![("page_view".to_string(), 2), ("purchase".to_string(), 1)]
    );
    assert_eq!(summary.total_sessions, 2);
    assert_eq!(summary.active_sessions, 1);

    Ok(())
}
