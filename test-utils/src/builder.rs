use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Faq, User};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Faq)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the catalog tables: users, follows, games and their versions.
    pub fn with_catalog_tables(self) -> Self {
        self.with_table(User)
            .with_table(UserFollow)
            .with_table(Game)
            .with_table(GameVersion)
    }

    /// Adds every table needed to move a game from cart to library.
    ///
    /// Includes the catalog tables plus reviews, carts, orders, payments and
    /// library entries.
    pub fn with_store_tables(self) -> Self {
        self.with_catalog_tables()
            .with_table(Review)
            .with_table(Cart)
            .with_table(CartItem)
            .with_table(Order)
            .with_table(OrderItem)
            .with_table(Payment)
            .with_table(LibraryEntry)
    }

    /// Adds support tickets and their messages on top of the user table.
    pub fn with_support_tables(self) -> Self {
        self.with_table(User)
            .with_table(SupportTicket)
            .with_table(TicketMessage)
    }

    /// Adds the chunked upload tables on top of the catalog tables.
    pub fn with_upload_tables(self) -> Self {
        self.with_catalog_tables()
            .with_table(UploadSession)
            .with_table(UploadChunk)
    }

    /// Adds the complete schema, used by router-level tests.
    pub fn with_all_tables(self) -> Self {
        self.with_store_tables()
            .with_table(SupportTicket)
            .with_table(TicketMessage)
            .with_table(Faq)
            .with_table(NewsArticle)
            .with_table(AnalyticsSession)
            .with_table(AnalyticsEvent)
            .with_table(AuditLog)
            .with_table(UploadSession)
            .with_table(UploadChunk)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
