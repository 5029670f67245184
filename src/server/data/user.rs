//! User data repository for database operations.
//!
//! Provides `UserRepository` for creating local users, resolving them by Keycloak
//! subject, profile updates, admin search and soft deletion.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::{CreateUserParam, UpdateProfileParam, User};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// # Arguments
    /// - `param` - Keycloak subject, username, email and optional display name
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on username or subject
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let now = Utc::now();

        let entity = entity::user::ActiveModel {
            keycloak_id: ActiveValue::Set(param.keycloak_id),
            username: ActiveValue::Set(param.username),
            email: ActiveValue::Set(param.email),
            display_name: ActiveValue::Set(param.display_name),
            bio: ActiveValue::Set(None),
            avatar_key: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by id, including soft-deleted users.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by id, ignoring soft-deleted users.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Active user found
    /// - `Ok(None)` - No user, or the user is soft-deleted
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_active_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id)
            .filter(entity::user::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by Keycloak subject, including soft-deleted users so the caller
    /// can refuse them explicitly.
    pub async fn find_by_keycloak_id(&self, keycloak_id: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::KeycloakId.eq(keycloak_id))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Loads several users at once, soft-deleted ones included.
    pub async fn find_many(&self, ids: &[i32]) -> Result<Vec<User>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// Updates the email Keycloak reports for the user when it has changed.
    pub async fn sync_email(&self, id: i32, email: &str) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .filter(entity::user::Column::Email.ne(email))
            .col_expr(entity::user::Column::Email, Expr::value(email))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Applies a profile update.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No active user with that id
    /// - `Err(DbErr)` - Database error
    pub async fn update_profile(
        &self,
        id: i32,
        param: UpdateProfileParam,
    ) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id)
            .filter(entity::user::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.into();
        if let Some(display_name) = param.display_name {
            active.display_name = ActiveValue::Set(Some(display_name));
        }
        if let Some(bio) = param.bio {
            active.bio = ActiveValue::Set(Some(bio));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(User::from_entity(entity)))
    }

    pub async fn set_avatar_key(&self, id: i32, avatar_key: &str) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::AvatarKey, Expr::value(avatar_key))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks a user as deleted.
    ///
    /// # Returns
    /// - `Ok(true)` - User was active and is now deleted
    /// - `Ok(false)` - No active user with that id
    /// - `Err(DbErr)` - Database error
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .filter(entity::user::Column::IsDeleted.eq(false))
            .col_expr(entity::user::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets active users with pagination, ordered by username.
    ///
    /// # Arguments
    /// - `search` - Optional substring of the username
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users per page
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn search_paginated(
        &self,
        search: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::IsDeleted.eq(false))
            .order_by_asc(entity::user::Column::Username);

        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(entity::user::Column::Username.contains(search.trim()));
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(User::from_entity).collect(), total))
    }
}
