//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let user = UserFactory::new(&db)
///     .keycloak_id("kc-123")
///     .username("forgemaster")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    keycloak_id: String,
    username: String,
    email: String,
    display_name: Option<String>,
    is_deleted: bool,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - keycloak_id: `"kc-{id}"`
    /// - username: `"user{id}"`
    /// - email: `"user{id}@example.com"`
    /// - is_deleted: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            keycloak_id: format!("kc-{}", id),
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            display_name: None,
            is_deleted: false,
        }
    }

    pub fn keycloak_id(mut self, keycloak_id: impl Into<String>) -> Self {
        self.keycloak_id = keycloak_id.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Marks the user as soft-deleted.
    pub fn deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            keycloak_id: ActiveValue::Set(self.keycloak_id),
            username: ActiveValue::Set(self.username),
            email: ActiveValue::Set(self.email),
            display_name: ActiveValue::Set(self.display_name),
            bio: ActiveValue::Set(None),
            avatar_key: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(self.is_deleted),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}
