use super::*;

/// Tests filtering tickets by owner and status, hiding deleted tickets.
///
/// Expected: one open ticket for the owner, three tickets overall
#[tokio::test]
async fn filters_by_owner_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_support_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let open = factory::create_ticket(db, owner.id).await?;
    factory::support_ticket::SupportTicketFactory::new(db, owner.id)
        .status("closed")
        .build()
        .await?;
    factory::support_ticket::SupportTicketFactory::new(db, owner.id)
        .deleted(true)
        .build()
        .await?;
    factory::create_ticket(db, other.id).await?;

    let repo = SupportTicketRepository::new(db);
    let (tickets, total) = repo
        .search_paginated(&TicketSearchParam {
            user_id: Some(owner.id),
            status: Some(TicketStatus::Open),
            page: 0,
            per_page: 10,
        })
        .await?;
    assert_eq!(total, 1);
    assert_eq!(tickets[0].id, open.id);

    let (_, all) = repo
        .search_paginated(&TicketSearchParam {
            user_id: None,
            status: None,
            page: 0,
            per_page: 10,
        })
        .await?;
    assert_eq!(all, 3);

    Ok(())
}
