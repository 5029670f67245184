use super::*;

/// Tests creating a ticket then assigning it to a support agent.
///
/// Expected: ticket starts open with the requested priority, assignment sets
/// both the assignee and the new status
#[tokio::test]
async fn assigns_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_support_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let agent = factory::create_user(db).await?;

    let repo = SupportTicketRepository::new(db);
    let ticket = repo
        .create(CreateTicketParam {
            user_id: owner.id,
            subject: "Download stalls".to_string(),
            description: "Stops at 40%".to_string(),
            priority: TicketPriority::High,
        })
        .await?;
    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.priority, TicketPriority::High);

    assert!(repo.assign(ticket.id, agent.id, TicketStatus::InProgress).await?);

    let stored = repo.find_by_id(ticket.id).await?.unwrap();
    assert_eq!(stored.assigned_to, Some(agent.id));
    assert_eq!(stored.status, TicketStatus::InProgress);

    assert!(repo.soft_delete(ticket.id).await?);
    assert!(repo.find_by_id(ticket.id).await?.is_none());
    assert!(!repo.set_status(ticket.id, TicketStatus::Closed).await?);

    Ok(())
}
