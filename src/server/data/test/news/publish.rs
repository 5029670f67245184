use super::*;

/// Tests that publishing stamps published_at once and keeps it on republish.
///
/// Expected: draft has no published_at, both publishes return the same timestamp
#[tokio::test]
async fn keeps_first_publish_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::NewsArticle)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let repo = NewsRepository::new(db);

    let draft = repo
        .create(CreateNewsParam {
            author_id: author.id,
            title: "Summer sale".to_string(),
            summary: None,
            content: "Everything is cheaper".to_string(),
        })
        .await?;
    assert!(!draft.is_published);
    assert!(draft.published_at.is_none());

    let first = repo.publish(draft.id).await?.unwrap();
    let second = repo.publish(draft.id).await?.unwrap();

    assert!(first.is_published);
    assert!(first.published_at.is_some());
    assert_eq!(first.published_at, second.published_at);

    Ok(())
}
