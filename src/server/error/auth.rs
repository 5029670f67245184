use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header on a request that requires one.
    #[error("Missing bearer token")]
    MissingToken,

    /// The bearer token failed signature, issuer or expiry checks.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The caller is authenticated but lacks a required role or ownership.
    ///
    /// # Fields
    /// - Local user id of the caller
    /// - Reason, logged only
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// The caller's local account has been soft-deleted.
    #[error("User {0} is disabled")]
    AccountDisabled(i32),

    /// The identity provider rejected the username/password or refresh token.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration conflicts with an existing account.
    #[error("User already exists")]
    UserExists,

    /// The identity provider could not be reached or answered unexpectedly.
    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// Converts authentication errors into HTTP responses.
///
/// Client-facing messages stay generic; the detailed reason is logged at debug level.
///
/// # Returns
/// - 400 Bad Request - Invalid credentials or registration conflict
/// - 401 Unauthorized - Missing or invalid token
/// - 403 Forbidden - Access denied or disabled account
/// - 500 Internal Server Error - Identity provider failure
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Self::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            Self::AccountDisabled(_) => (StatusCode::FORBIDDEN, "Account is disabled"),
            Self::InvalidCredentials => (StatusCode::BAD_REQUEST, "Invalid username or password"),
            Self::UserExists => (
                StatusCode::BAD_REQUEST,
                "Username or email is already registered",
            ),
            Self::Provider(msg) => {
                tracing::error!("Identity provider error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
