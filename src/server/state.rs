//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through
//! Axum's state extraction. External systems (identity provider, object storage, email)
//! sit behind trait objects so tests can swap in in-memory fakes.

use std::sync::Arc;

use oauth2::{basic::BasicClient, EndpointNotSet, EndpointSet};
use sea_orm::DatabaseConnection;

use crate::server::{email::EmailSender, identity::IdentityProvider, storage::StorageService};

/// OAuth2 client for the Keycloak realm with token and revocation endpoints configured.
pub(crate) type OAuth2Client =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet, EndpointSet>;

/// Application state containing shared resources and dependencies.
///
/// Every field is cheap to clone: the database connection is a pool handle and the
/// service implementations are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Verifies bearer tokens and performs login, refresh, logout and registration.
    pub identity: Arc<dyn IdentityProvider>,

    /// Object storage for game binaries, images and upload chunks.
    pub storage: Arc<dyn StorageService>,

    /// Outgoing email transport.
    pub email: Arc<dyn EmailSender>,

    /// Largest accepted upload chunk in bytes.
    pub max_chunk_size: usize,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `identity` - Identity provider implementation
    /// - `storage` - Object storage implementation
    /// - `email` - Email sender implementation
    /// - `max_chunk_size` - Upload chunk size limit in bytes
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn StorageService>,
        email: Arc<dyn EmailSender>,
        max_chunk_size: usize,
    ) -> Self {
        Self {
            db,
            identity,
            storage,
            email,
            max_chunk_size,
        }
    }
}
