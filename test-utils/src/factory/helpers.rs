//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

use crate::factory::{game::GameFactory, library_entry::create_library_entry, user::create_user};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a developer and a published game owned by them.
///
/// # Returns
/// - `Ok((developer, game))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_published_game(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::game::Model), DbErr> {
    let developer = create_user(db).await?;
    let game = GameFactory::new(db, developer.id)
        .published(true)
        .build()
        .await?;

    Ok((developer, game))
}

/// Creates a published game plus a buyer who already owns it.
///
/// # Returns
/// - `Ok((buyer, game, library_entry))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_owned_game(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::game::Model,
        entity::library_entry::Model,
    ),
    DbErr,
> {
    let (_, game) = create_published_game(db).await?;
    let buyer = create_user(db).await?;
    let entry = create_library_entry(db, buyer.id, game.id).await?;

    Ok((buyer, game, entry))
}
