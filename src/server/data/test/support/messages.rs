use super::*;

/// Tests that ticket messages are listed oldest first.
///
/// Expected: both messages in insertion order
#[tokio::test]
async fn lists_messages_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_support_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let agent = factory::create_user(db).await?;
    let ticket = factory::create_ticket(db, owner.id).await?;

    let repo = TicketMessageRepository::new(db);
    repo.create(ticket.id, owner.id, "Any update?".to_string()).await?;
    repo.create(ticket.id, agent.id, "Looking into it".to_string()).await?;

    let messages = repo.list_by_ticket(ticket.id).await?;
    let authors: Vec<_> = messages.iter().map(|m| m.author_id).collect();
    assert_eq!(authors, vec![owner.id, agent.id]);
    assert_eq!(messages[1].message, "Looking into it");

    Ok(())
}
