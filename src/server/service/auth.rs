use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    email::EmailSender,
    error::AppError,
    identity::{IdentityProvider, RegistrationRequest, TokenSet},
    model::user::{CreateUserParam, User},
    service::notifier::Notifier,
};

/// Account lifecycle on top of the identity provider.
///
/// Keycloak owns credentials and sessions; this service keeps the local user table in
/// step with it.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    identity: &'a dyn IdentityProvider,
    email: &'a dyn EmailSender,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        identity: &'a dyn IdentityProvider,
        email: &'a dyn EmailSender,
    ) -> Self {
        Self {
            db,
            identity,
            email,
        }
    }

    /// Registers the account in Keycloak and creates the matching local user.
    ///
    /// # Returns
    /// - `Ok(User)` - Newly created local user
    /// - `Err(AppError::BadRequest)` - Username already used locally
    /// - `Err(AuthError::UserExists)` - Keycloak already has the username or email
    pub async fn register(&self, request: RegistrationRequest) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::BadRequest(
                "Username is already taken".to_string(),
            ));
        }

        let keycloak_id = self.identity.register(&request).await?;

        let user = repo
            .create(CreateUserParam {
                keycloak_id,
                username: request.username,
                email: request.email,
                display_name: request.display_name,
            })
            .await?;

        tracing::info!("Registered user {} ({})", user.id, user.username);

        Notifier::new(self.email).welcome(&user).await;

        Ok(user)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenSet, AppError> {
        Ok(self.identity.login(username, password).await?)
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, AppError> {
        Ok(self.identity.refresh(refresh_token).await?)
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        Ok(self.identity.logout(refresh_token).await?)
    }
}
