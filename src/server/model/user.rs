//! User domain models and parameters.
//!
//! Local user rows mirror Keycloak accounts. They are created on registration or
//! lazily on first authenticated request and carry profile data Keycloak does not
//! own (bio, avatar, follows).

use chrono::{DateTime, Utc};

use crate::model::user::{PublicProfileDto, UserDto, UserSummaryDto};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Keycloak subject of the account.
    pub keycloak_id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    /// Key of the avatar image in the `images` bucket.
    pub avatar_key: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            keycloak_id: entity.keycloak_id,
            username: entity.username,
            email: entity.email,
            display_name: entity.display_name,
            bio: entity.bio,
            avatar_key: entity.avatar_key,
            is_deleted: entity.is_deleted,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts the user to the DTO returned to the user themselves and to admins.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            display_name: self.display_name,
            bio: self.bio,
            avatar_key: self.avatar_key,
            created_at: self.created_at,
        }
    }

    pub fn into_summary_dto(self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            username: self.username,
            display_name: self.display_name,
        }
    }
}

/// Public view of a user with follow counts. Email is never exposed here.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicProfile {
    pub user: User,
    pub follower_count: u64,
    pub following_count: u64,
}

impl PublicProfile {
    pub fn into_dto(self) -> PublicProfileDto {
        PublicProfileDto {
            id: self.user.id,
            username: self.user.username,
            display_name: self.user.display_name,
            bio: self.user.bio,
            avatar_key: self.user.avatar_key,
            follower_count: self.follower_count,
            following_count: self.following_count,
            created_at: self.user.created_at,
        }
    }
}

/// Parameters for creating a local user row.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub keycloak_id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Parameters for profile updates. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParam {
    pub display_name: Option<String>,
    pub bio: Option<String>,
}
