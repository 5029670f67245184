use std::sync::Arc;

use oauth2::{ClientId, ClientSecret, RevocationUrl, TokenUrl};

use crate::server::{
    config::Config,
    email::{EmailSender, LogEmailSender},
    error::{config::ConfigError, AppError},
    identity::{IdentityProvider, KeycloakClient},
    state::OAuth2Client,
    storage::{fs::FsStorage, StorageService},
};

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up-to-date before any request is
/// served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for every outbound call.
///
/// Redirects are disabled so a compromised upstream cannot bounce requests to
/// internal hosts.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the OAuth2 client for the configured Keycloak realm.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with token and revocation endpoints set
/// - `Err(AppError)` - `KEYCLOAK_URL` does not produce valid endpoint URLs
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let endpoint = |path: &str| format!("{}/protocol/openid-connect/{}", config.keycloak_issuer(), path);
    let invalid_url = |_| ConfigError::InvalidEnvVar {
        name: "KEYCLOAK_URL".to_string(),
        value: config.keycloak_url.clone(),
    };

    let token_url = TokenUrl::new(endpoint("token")).map_err(invalid_url)?;
    let revocation_url = RevocationUrl::new(endpoint("revoke")).map_err(invalid_url)?;

    let client = oauth2::basic::BasicClient::new(ClientId::new(config.keycloak_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.keycloak_client_secret.clone()))
        .set_token_uri(token_url)
        .set_revocation_url(revocation_url);

    Ok(client)
}

/// Creates the Keycloak identity provider.
pub fn setup_identity(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<Arc<dyn IdentityProvider>, AppError> {
    let oauth_client = setup_oauth_client(config)?;

    Ok(Arc::new(KeycloakClient::new(config, http_client, oauth_client)))
}

/// Creates the filesystem-backed object storage rooted at `STORAGE_ROOT`.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn StorageService>, AppError> {
    let storage = FsStorage::new(&config.storage_root).await?;

    tracing::info!("Object storage rooted at {}", config.storage_root);

    Ok(Arc::new(storage))
}

pub fn setup_email(config: &Config) -> Arc<dyn EmailSender> {
    Arc::new(LogEmailSender::new(config.email_from.clone()))
}
