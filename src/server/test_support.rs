//! In-process fakes for the identity provider, object storage and email seams.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};

use crate::server::{
    email::{EmailError, EmailMessage, EmailSender},
    error::{auth::AuthError, storage::StorageError},
    identity::{Claims, IdentityProvider, RegistrationRequest, TokenSet},
    state::AppState,
    storage::{validate_key, Bucket, ComposedObject, StorageService, StoredObject},
};

pub const TEST_MAX_CHUNK_SIZE: usize = 1024;

/// Claims for `sub` with email `{username}@example.com`.
pub fn claims(sub: &str, username: &str, roles: &[&str]) -> Claims {
    Claims {
        sub: sub.to_string(),
        preferred_username: Some(username.to_string()),
        email: Some(format!("{}@example.com", username)),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// Application state wired to fakes, with handles to inspect them.
pub struct TestApp {
    pub state: AppState,
    pub identity: Arc<FakeIdentity>,
    pub storage: Arc<MemoryStorage>,
    pub email: Arc<RecordingEmail>,
}

impl TestApp {
    pub fn new(db: DatabaseConnection) -> Self {
        let identity = Arc::new(FakeIdentity::default());
        let storage = Arc::new(MemoryStorage::default());
        let email = Arc::new(RecordingEmail::default());

        let state = AppState::new(
            db,
            identity.clone(),
            storage.clone(),
            email.clone(),
            TEST_MAX_CHUNK_SIZE,
        );

        Self {
            state,
            identity,
            storage,
            email,
        }
    }
}

#[derive(Default)]
pub struct FakeIdentity {
    tokens: Mutex<HashMap<String, Claims>>,
    accounts: Mutex<HashMap<String, String>>,
}

impl FakeIdentity {
    /// Makes `token` verify as `claims`.
    pub fn add_token(&self, token: &str, claims: Claims) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(token.to_string(), claims);
        }
    }

    fn issue(&self, username: &str) -> TokenSet {
        let access_token = format!("access-{}", username);
        self.add_token(&access_token, claims(&format!("kc-{}", username), username, &[]));

        TokenSet {
            access_token,
            refresh_token: Some(format!("refresh-{}", username)),
            expires_in: Some(300),
            token_type: "Bearer".to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens
            .lock()
            .ok()
            .and_then(|tokens| tokens.get(token).cloned())
            .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()))
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenSet, AuthError> {
        let known = self
            .accounts
            .lock()
            .ok()
            .and_then(|accounts| accounts.get(username).cloned());

        match known {
            Some(stored) if stored == password => Ok(self.issue(username)),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, AuthError> {
        match refresh_token.strip_prefix("refresh-") {
            Some(username) => Ok(self.issue(username)),
            None => Err(AuthError::InvalidCredentials),
        }
    }

    async fn logout(&self, _refresh_token: &str) -> Result<(), AuthError> {
        Ok(())
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<String, AuthError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| AuthError::Provider("poisoned".to_string()))?;

        if accounts.contains_key(&request.username) {
            return Err(AuthError::UserExists);
        }
        accounts.insert(request.username.clone(), request.password.clone());

        Ok(format!("kc-{}", request.username))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<(Bucket, String), Bytes>>,
}

impl MemoryStorage {
    pub fn object(&self, bucket: Bucket, key: &str) -> Option<Bytes> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(&(bucket, key.to_string())).cloned())
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.objects
            .lock()
            .map(|objects| objects.keys().filter(|(b, _)| *b == bucket).count())
            .unwrap_or(0)
    }

    fn poisoned() -> StorageError {
        StorageError::Io(std::io::Error::other("storage lock poisoned"))
    }
}

#[async_trait]
impl StorageService for MemoryStorage {
    async fn put_object(&self, bucket: Bucket, key: &str, data: Bytes) -> Result<(), StorageError> {
        validate_key(key)?;
        self.objects
            .lock()
            .map_err(|_| Self::poisoned())?
            .insert((bucket, key.to_string()), data);
        Ok(())
    }

    async fn open_object(&self, bucket: Bucket, key: &str) -> Result<StoredObject, StorageError> {
        validate_key(key)?;
        let data = self
            .object(bucket, key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;

        Ok(StoredObject {
            size: data.len() as u64,
            reader: Box::pin(std::io::Cursor::new(data.to_vec())),
        })
    }

    async fn compose_object(
        &self,
        dest: Bucket,
        key: &str,
        source: Bucket,
        parts: &[String],
    ) -> Result<ComposedObject, StorageError> {
        validate_key(key)?;
        let mut buffer = BytesMut::new();
        for part in parts {
            let data = self
                .object(source, part)
                .ok_or_else(|| StorageError::NotFound(part.clone()))?;
            buffer.extend_from_slice(&data);
        }

        let sha256 = hex::encode(Sha256::digest(&buffer));
        let size = buffer.len() as u64;
        self.put_object(dest, key, buffer.freeze()).await?;

        Ok(ComposedObject { size, sha256 })
    }

    async fn delete_object(&self, bucket: Bucket, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.objects
            .lock()
            .map_err(|_| Self::poisoned())?
            .remove(&(bucket, key.to_string()));
        Ok(())
    }

    async fn object_exists(&self, bucket: Bucket, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        Ok(self.object(bucket, key).is_some())
    }
}

#[derive(Default)]
pub struct RecordingEmail {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmail {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EmailSender for RecordingEmail {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !message.to.contains('@') {
            return Err(EmailError::InvalidRecipient(message.to));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message);
        }
        Ok(())
    }
}
