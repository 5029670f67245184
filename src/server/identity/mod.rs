//! Identity provider seam.
//!
//! Authentication is delegated to an OpenID Connect provider. Handlers only see the
//! `IdentityProvider` trait; `KeycloakClient` is the production implementation.

pub mod keycloak;

use async_trait::async_trait;

use crate::{model::auth::TokenDto, server::error::auth::AuthError};

pub use keycloak::KeycloakClient;

/// Verified contents of an access token.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    /// Subject, the provider's user id.
    pub sub: String,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
    /// Realm roles granted to the user.
    pub roles: Vec<String>,
}

/// Tokens returned by a password or refresh grant.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: String,
}

impl TokenSet {
    pub fn into_dto(self) -> TokenDto {
        TokenDto {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in,
            token_type: self.token_type,
        }
    }
}

/// New account to create in the provider.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Validates an access token and returns its claims.
    async fn verify_token(&self, token: &str) -> Result<Claims, AuthError>;

    /// Resource owner password grant.
    async fn login(&self, username: &str, password: &str) -> Result<TokenSet, AuthError>;

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, AuthError>;

    /// Revokes the refresh token, ending the provider session.
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Creates the account and returns the provider's user id.
    async fn register(&self, request: &RegistrationRequest) -> Result<String, AuthError>;
}
