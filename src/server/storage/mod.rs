//! Object storage seam.
//!
//! Game binaries, cover and avatar images, and in-flight upload chunks are stored as
//! objects addressed by bucket and key. Services depend on `StorageService`; the server
//! runs `FsStorage`, which lays buckets out as directories.

pub mod fs;

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncRead;

use crate::server::error::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Finished game binaries, keyed `{game_id}/{version}/{file_name}`.
    Games,
    /// Cover art and avatars.
    Images,
    /// Chunks of unfinished uploads, keyed `{upload_id}/{index:05}`.
    Uploads,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Games => "games",
            Bucket::Images => "images",
            Bucket::Uploads => "uploads",
        }
    }
}

/// Readable handle to a stored object.
pub struct StoredObject {
    pub reader: Pin<Box<dyn AsyncRead + Send>>,
    pub size: u64,
}

/// Result of concatenating parts into a new object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedObject {
    pub size: u64,
    /// Lowercase hex SHA-256 of the composed content.
    pub sha256: String,
}

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Stores `data` under `key`, replacing any existing object.
    async fn put_object(&self, bucket: Bucket, key: &str, data: Bytes) -> Result<(), StorageError>;

    /// Opens an object for streaming.
    ///
    /// # Returns
    /// - `Ok(StoredObject)` - Reader and size in bytes
    /// - `Err(StorageError::NotFound)` - No object under `key`
    async fn open_object(&self, bucket: Bucket, key: &str) -> Result<StoredObject, StorageError>;

    /// Concatenates `parts` from `source` in order into `key` in `dest`.
    async fn compose_object(
        &self,
        dest: Bucket,
        key: &str,
        source: Bucket,
        parts: &[String],
    ) -> Result<ComposedObject, StorageError>;

    /// Deletes an object. Deleting a missing object succeeds.
    async fn delete_object(&self, bucket: Bucket, key: &str) -> Result<(), StorageError>;

    async fn object_exists(&self, bucket: Bucket, key: &str) -> Result<bool, StorageError>;
}

/// Rejects keys that are empty, absolute, or could escape their bucket.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_keys() {
        assert!(validate_key("12/1.0.0/game.zip").is_ok());
        assert!(validate_key("upload-1/00003").is_ok());
    }

    #[test]
    fn rejects_escaping_keys() {
        for key in ["", "/etc/passwd", "a/../b", "..", "a//b", "a\\b", "./a", "a/"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }
}
