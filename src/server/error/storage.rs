use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum StorageError {
    /// Object key is empty, absolute, or escapes its bucket.
    #[error("Invalid object key '{0}'")]
    InvalidKey(String),

    /// No object stored under the key.
    #[error("Object '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(key) => {
                tracing::debug!("Object {} not found", key);
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: "File not found".to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
