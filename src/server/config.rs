use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_STORAGE_ROOT: &str = "./storage";
const DEFAULT_EMAIL_FROM: &str = "no-reply@forja.local";
const DEFAULT_MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;
const DEFAULT_UPLOAD_SESSION_TTL_HOURS: i64 = 24;

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    pub keycloak_url: String,
    pub keycloak_realm: String,
    pub keycloak_client_id: String,
    pub keycloak_client_secret: String,

    pub storage_root: String,
    pub email_from: String,

    /// Largest accepted upload chunk in bytes.
    pub max_chunk_size: usize,
    /// Idle time after which an unfinished upload session is aborted.
    pub upload_session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let keycloak_url = required("KEYCLOAK_URL")?.trim_end_matches('/').to_string();
        if url::Url::parse(&keycloak_url).is_err() {
            return Err(ConfigError::InvalidEnvVar {
                name: "KEYCLOAK_URL".to_string(),
                value: keycloak_url,
            }
            .into());
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            keycloak_url,
            keycloak_realm: required("KEYCLOAK_REALM")?,
            keycloak_client_id: required("KEYCLOAK_CLIENT_ID")?,
            keycloak_client_secret: required("KEYCLOAK_CLIENT_SECRET")?,
            storage_root: optional("STORAGE_ROOT", DEFAULT_STORAGE_ROOT),
            email_from: optional("EMAIL_FROM", DEFAULT_EMAIL_FROM),
            max_chunk_size: parsed("MAX_CHUNK_SIZE", DEFAULT_MAX_CHUNK_SIZE)?,
            upload_session_ttl_hours: parsed(
                "UPLOAD_SESSION_TTL_HOURS",
                DEFAULT_UPLOAD_SESSION_TTL_HOURS,
            )?,
        })
    }

    /// Issuer expected in access tokens, `{url}/realms/{realm}`.
    pub fn keycloak_issuer(&self) -> String {
        format!("{}/realms/{}", self.keycloak_url, self.keycloak_realm)
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
