use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    identity::Claims,
    model::user::{CreateUserParam, User},
    state::AppState,
};

/// Realm role granting full administrative access.
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_DEVELOPER: &str = "developer";
pub const ROLE_SUPPORT: &str = "support";

/// Role-based policies checked by `AuthGuard::require`.
///
/// Admins satisfy every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// `admin` realm role.
    Admin,
    /// `admin` or `moderator`.
    Moderate,
    /// `admin` or `developer`.
    Developer,
    /// `admin` or `support`.
    Support,
}

impl Permission {
    fn roles(&self) -> &'static [&'static str] {
        match self {
            Permission::Admin => &[ROLE_ADMIN],
            Permission::Moderate => &[ROLE_ADMIN, ROLE_MODERATOR],
            Permission::Developer => &[ROLE_ADMIN, ROLE_DEVELOPER],
            Permission::Support => &[ROLE_ADMIN, ROLE_SUPPORT],
        }
    }
}

/// Authenticated caller: the local user plus the realm roles from the token.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub user: User,
    pub roles: Vec<String>,
}

impl CurrentUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    pub fn satisfies(&self, permission: Permission) -> bool {
        permission.roles().iter().any(|role| self.has_role(role))
    }

    pub fn id(&self) -> i32 {
        self.user.id
    }
}

/// Resolves the bearer token of a request to a `CurrentUser`.
///
/// The first authenticated request of a Keycloak account creates its local user row;
/// later requests keep the stored email in sync with the token.
pub struct AuthGuard<'a> {
    state: &'a AppState,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(state: &'a AppState, headers: &'a HeaderMap) -> Self {
        Self { state, headers }
    }

    /// Requires an authenticated caller satisfying every permission in `permissions`.
    ///
    /// # Returns
    /// - `Ok(CurrentUser)` - Authenticated caller with all permissions
    /// - `Err(AuthError::MissingToken)` - No bearer token on the request
    /// - `Err(AuthError::InvalidToken)` - Token rejected by the identity provider
    /// - `Err(AuthError::AccountDisabled)` - Local account has been deleted
    /// - `Err(AuthError::AccessDenied)` - A permission is not satisfied
    pub async fn require(&self, permissions: &[Permission]) -> Result<CurrentUser, AppError> {
        let Some(token) = bearer_token(self.headers)? else {
            return Err(AuthError::MissingToken.into());
        };

        let current = self.authenticate(token).await?;

        for permission in permissions {
            if !current.satisfies(*permission) {
                return Err(AuthError::AccessDenied(
                    current.user.id,
                    format!("missing {:?} permission", permission),
                )
                .into());
            }
        }

        Ok(current)
    }

    /// Resolves the caller when a bearer token is present.
    ///
    /// A present but invalid token is still an error.
    pub async fn optional(&self) -> Result<Option<CurrentUser>, AppError> {
        match bearer_token(self.headers)? {
            Some(token) => Ok(Some(self.authenticate(token).await?)),
            None => Ok(None),
        }
    }

    async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let claims = self.state.identity.verify_token(token).await?;
        let user = resolve_user(&self.state.db, &claims).await?;

        if user.is_deleted {
            return Err(AuthError::AccountDisabled(user.id).into());
        }

        Ok(CurrentUser {
            user,
            roles: claims.roles,
        })
    }
}

/// Finds the local user for the token subject, creating it on first sight.
async fn resolve_user(
    db: &sea_orm::DatabaseConnection,
    claims: &Claims,
) -> Result<User, AppError> {
    let repo = UserRepository::new(db);

    if let Some(mut user) = repo.find_by_keycloak_id(&claims.sub).await? {
        if let Some(email) = claims.email.as_deref() {
            if email != user.email && !user.is_deleted {
                repo.sync_email(user.id, email).await?;
                user.email = email.to_string();
            }
        }
        return Ok(user);
    }

    let fallback = format!("user-{}", claims.sub);
    let mut username = claims
        .preferred_username
        .clone()
        .unwrap_or_else(|| fallback.clone());
    if repo.find_by_username(&username).await?.is_some() {
        username = fallback;
    }

    let user = repo
        .create(CreateUserParam {
            keycloak_id: claims.sub.clone(),
            username,
            email: claims.email.clone().unwrap_or_default(),
            display_name: None,
        })
        .await?;

    tracing::info!("Created local user {} for subject {}", user.id, claims.sub);

    Ok(user)
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// # Returns
/// - `Ok(None)` - No `Authorization` header
/// - `Ok(Some(token))` - Bearer token
/// - `Err(AuthError::InvalidToken)` - Header present but not a bearer credential
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("authorization header is not ASCII".to_string()))?;

    let Some((scheme, token)) = value.split_once(' ') else {
        return Err(AuthError::InvalidToken("malformed authorization header".to_string()));
    };

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::InvalidToken("expected a bearer token".to_string()));
    }

    Ok(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use test_utils::{builder::TestBuilder, factory};

    use crate::server::test_support::{claims, TestApp};

    fn headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("abc")).unwrap(), Some("abc"));
        assert_eq!(bearer_token(&HeaderMap::new()).unwrap(), None);

        let mut basic = HeaderMap::new();
        basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(bearer_token(&basic).is_err());
    }

    /// Tests that the first request of a new subject creates the local user.
    ///
    /// Expected: Ok(CurrentUser) with the token's username, email and roles
    #[tokio::test]
    async fn creates_user_on_first_request() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let app = TestApp::new(test.db.as_ref().unwrap().clone());
        app.identity
            .add_token("t1", claims("kc-new", "newcomer", &["developer"]));

        let headers = headers("t1");
        let current = AuthGuard::new(&app.state, &headers)
            .require(&[Permission::Developer])
            .await?;

        assert_eq!(current.user.keycloak_id, "kc-new");
        assert_eq!(current.user.username, "newcomer");
        assert_eq!(current.user.email, "newcomer@example.com");
        assert!(current.has_role("developer"));
        assert!(!current.is_admin());

        Ok(())
    }

    /// Tests that a username taken by another account falls back to the subject.
    ///
    /// Expected: Ok with username "user-kc-second"
    #[tokio::test]
    async fn falls_back_when_username_taken() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::user::UserFactory::new(db)
            .keycloak_id("kc-first")
            .username("shared")
            .build()
            .await?;

        let app = TestApp::new(db.clone());
        app.identity
            .add_token("t2", claims("kc-second", "shared", &[]));

        let headers = headers("t2");
        let current = AuthGuard::new(&app.state, &headers).require(&[]).await?;

        assert_eq!(current.user.username, "user-kc-second");

        Ok(())
    }

    /// Tests permission checks against realm roles.
    ///
    /// Expected: Err(AccessDenied) for Admin, Ok for Support, admins pass everything
    #[tokio::test]
    async fn checks_roles() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let app = TestApp::new(test.db.as_ref().unwrap().clone());
        app.identity
            .add_token("agent", claims("kc-agent", "agent", &["support"]));
        app.identity
            .add_token("root", claims("kc-root", "root", &["admin"]));

        let agent = headers("agent");
        let result = AuthGuard::new(&app.state, &agent)
            .require(&[Permission::Admin])
            .await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
        ));
        assert!(AuthGuard::new(&app.state, &agent)
            .require(&[Permission::Support])
            .await
            .is_ok());

        let root = headers("root");
        let admin = AuthGuard::new(&app.state, &root)
            .require(&[
                Permission::Admin,
                Permission::Moderate,
                Permission::Developer,
                Permission::Support,
            ])
            .await?;
        assert!(admin.is_admin());

        Ok(())
    }

    /// Tests that deleted accounts are refused even with a valid token.
    ///
    /// Expected: Err(AccountDisabled)
    #[tokio::test]
    async fn rejects_deleted_user() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::user::UserFactory::new(db)
            .keycloak_id("kc-gone")
            .deleted(true)
            .build()
            .await?;

        let app = TestApp::new(db.clone());
        app.identity.add_token("gone", claims("kc-gone", "gone", &[]));

        let headers = headers("gone");
        let result = AuthGuard::new(&app.state, &headers).require(&[]).await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::AccountDisabled(_)))
        ));

        Ok(())
    }

    /// Tests the optional guard with and without a token.
    ///
    /// Expected: None without header, Err for an unknown token
    #[tokio::test]
    async fn optional_guard() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let app = TestApp::new(test.db.as_ref().unwrap().clone());

        let empty = HeaderMap::new();
        assert!(AuthGuard::new(&app.state, &empty).optional().await?.is_none());

        let unknown = headers("nope");
        assert!(AuthGuard::new(&app.state, &unknown).optional().await.is_err());

        Ok(())
    }
}
