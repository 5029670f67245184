use super::*;

/// Tests listing published articles newest first, skipping drafts and deleted ones.
///
/// Expected: the two live published articles, most recent first
#[tokio::test]
async fn lists_published_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::NewsArticle)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let now = Utc::now();

    factory::news_article::NewsArticleFactory::new(db, author.id)
        .title("Older")
        .published_at(now - Duration::days(2))
        .build()
        .await?;
    factory::news_article::NewsArticleFactory::new(db, author.id)
        .title("Newer")
        .published_at(now - Duration::days(1))
        .build()
        .await?;
    factory::news_article::NewsArticleFactory::new(db, author.id)
        .title("Draft")
        .build()
        .await?;
    factory::news_article::NewsArticleFactory::new(db, author.id)
        .title("Removed")
        .published_at(now)
        .deleted(true)
        .build()
        .await?;

    let (articles, total) = NewsRepository::new(db).get_published_paginated(0, 10).await?;

    assert_eq!(total, 2);
    let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Newer", "Older"]);

    Ok(())
}
