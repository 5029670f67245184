use super::*;

/// Tests FAQ ordering by sort order with deleted entries hidden.
///
/// Expected: questions ordered by sort_order, deleted one absent
#[tokio::test]
async fn orders_by_sort_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Faq)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (question, sort_order) in [("Refunds?", 2), ("Install?", 1), ("Accounts?", 3)] {
        factory::faq::FaqFactory::new(db)
            .question(question)
            .sort_order(sort_order)
            .build()
            .await?;
    }
    factory::faq::FaqFactory::new(db)
        .question("Old?")
        .sort_order(0)
        .deleted(true)
        .build()
        .await?;

    let faqs = FaqRepository::new(db).get_all().await?;
    let questions: Vec<_> = faqs.iter().map(|f| f.question.as_str()).collect();
    assert_eq!(questions, vec!["Install?", "Refunds?", "Accounts?"]);

    Ok(())
}

/// Tests updating then deleting an entry.
///
/// Expected: update changes only the given fields, updates after delete return None
#[tokio::test]
async fn updates_and_deletes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Faq)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let faq = factory::create_faq(db).await?;
    let repo = FaqRepository::new(db);

    let updated = repo
        .update(
            faq.id,
            UpdateFaqParam {
                question: None,
                answer: Some("Yes".to_string()),
                sort_order: None,
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.question, faq.question);
    assert_eq!(updated.answer, "Yes");

    assert!(repo.soft_delete(faq.id).await?);
    assert!(repo
        .update(
            faq.id,
            UpdateFaqParam {
                question: None,
                answer: Some("No".to_string()),
                sort_order: None,
            },
        )
        .await?
        .is_none());

    Ok(())
}
