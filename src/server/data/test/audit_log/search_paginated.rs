use super::*;

/// Tests recording entries and filtering them by entity type and actor.
///
/// Expected: entity filter returns 2 order entries, actor filter returns 1
#[tokio::test]
async fn filters_entries() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AuditLog)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuditLogRepository::new(db);
    let refund = repo
        .create(AuditEntry::new(1, "order.refund", "order", 10).details("requested by user"))
        .await?;
    repo.create(AuditEntry::new(2, "order.refund", "order", 11))
        .await?;
    repo.create(AuditEntry::new(1, "user.delete", "user", 5))
        .await?;

    assert_eq!(refund.entity_id.as_deref(), Some("10"));
    assert_eq!(refund.details.as_deref(), Some("requested by user"));

    let (_, orders) = repo
        .search_paginated(&AuditLogSearchParam {
            entity_type: Some("order".to_string()),
            user_id: None,
            page: 0,
            per_page: 10,
        })
        .await?;
    assert_eq!(orders, 2);

    let (entries, by_user) = repo
        .search_paginated(&AuditLogSearchParam {
            entity_type: Some("order".to_string()),
            user_id: Some(1),
            page: 0,
            per_page: 10,
        })
        .await?;
    assert_eq!(by_user, 1);
    assert_eq!(entries[0].action, "order.refund");

    Ok(())
}
