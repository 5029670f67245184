use super::*;
use crate::{
    model::support::{TicketPriority, TicketStatus},
    server::{
        model::support::CreateTicketParam, service::support::SupportService,
        test_support::RecordingEmail,
    },
};

/// Tests that changing a ticket's status notifies its owner.
///
/// Expected: status resolved, one email to the owner naming the new status
#[tokio::test]
async fn status_change_emails_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_support_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let email = RecordingEmail::default();

    let owner = factory::create_user(db).await?;
    let owner_email = owner.email.clone();
    let service = SupportService::new(db, &email);

    let ticket = service
        .create(CreateTicketParam {
            user_id: owner.id,
            subject: "Game crashes".to_string(),
            description: "Crashes on launch".to_string(),
            priority: TicketPriority::High,
        })
        .await?;
    assert_eq!(ticket.status, TicketStatus::Open);

    let updated = service.set_status(ticket.id, TicketStatus::Resolved).await?;
    assert_eq!(updated.status, TicketStatus::Resolved);

    let sent = email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, owner_email);
    assert!(sent[0].subject.contains("resolved"));

    Ok(())
}

/// Tests who may read a ticket and that closed tickets take no messages.
///
/// Expected: stranger 403, support agent reads messages, closed ticket 400
#[tokio::test]
async fn messages_and_access() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_support_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let email = RecordingEmail::default();

    let owner = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let agent = factory::create_user(db).await?;
    let ticket = factory::create_ticket(db, owner.id).await?;

    let owner = caller(owner, &[]);
    let stranger = caller(stranger, &[]);
    let agent = caller(agent, &["support"]);
    let service = SupportService::new(db, &email);

    service
        .add_message(&owner, ticket.id, "Any news?".to_string())
        .await?;
    service
        .add_message(&agent, ticket.id, "Looking into it".to_string())
        .await?;

    assert!(is_access_denied(&service.get(&stranger, ticket.id).await));

    let detail = service.get(&agent, ticket.id).await?;
    assert_eq!(detail.messages.len(), 2);
    assert_eq!(detail.messages[0].author_id, owner.id());

    service.set_status(ticket.id, TicketStatus::Closed).await?;
    let late = service
        .add_message(&owner, ticket.id, "Still broken".to_string())
        .await;
    assert!(is_bad_request(&late));

    Ok(())
}

/// Tests listing scope for customers and support staff.
///
/// Expected: customer sees own tickets only, agent sees all
#[tokio::test]
async fn list_scopes_by_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_support_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let email = RecordingEmail::default();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let agent = factory::create_user(db).await?;
    factory::create_ticket(db, first.id).await?;
    factory::create_ticket(db, second.id).await?;

    let service = SupportService::new(db, &email);

    let own = service.list(&caller(first, &[]), None, 0, 10).await?;
    assert_eq!(own.total, 1);

    let all = service.list(&caller(agent, &["support"]), None, 0, 10).await?;
    assert_eq!(all.total, 2);

    Ok(())
}

/// Tests assignment of open tickets and unknown assignees.
///
/// Expected: open ticket becomes in_progress; missing assignee 404
#[tokio::test]
async fn assign_starts_work() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_support_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let email = RecordingEmail::default();

    let owner = factory::create_user(db).await?;
    let agent = factory::create_user(db).await?;
    let ticket = factory::create_ticket(db, owner.id).await?;

    let service = SupportService::new(db, &email);

    let assigned = service.assign(ticket.id, agent.id).await?;
    assert_eq!(assigned.assigned_to, Some(agent.id));
    assert_eq!(assigned.status, TicketStatus::InProgress);

    assert!(is_not_found(&service.assign(ticket.id, 9999).await));

    Ok(())
}

/// Tests deleting a ticket that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn delete_missing_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_support_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let email = RecordingEmail::default();

    let agent = factory::create_user(db).await?;
    let result = SupportService::new(db, &email)
        .delete(&caller(agent, &["support"]), 4242)
        .await;

    assert!(is_not_found(&result));

    Ok(())
}
