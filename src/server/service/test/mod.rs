use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::CurrentUser,
    model::user::User,
};
use test_utils::{builder::TestBuilder, factory};

mod order;
mod support;
mod upload;
mod user;

/// Wraps a factory user as an authenticated caller with `roles`.
fn caller(model: entity::user::Model, roles: &[&str]) -> CurrentUser {
    CurrentUser {
        user: User::from_entity(model),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

fn is_access_denied<T>(result: &Result<T, AppError>) -> bool {
    matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(_, _))))
}

fn is_bad_request<T>(result: &Result<T, AppError>) -> bool {
    matches!(result, Err(AppError::BadRequest(_)))
}

fn is_not_found<T>(result: &Result<T, AppError>) -> bool {
    matches!(result, Err(AppError::NotFound(_)))
}
