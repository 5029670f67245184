use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use tokio::{
    fs::{self, File},
    io::{AsyncReadExt, AsyncWriteExt},
};

use crate::server::{
    error::storage::StorageError,
    storage::{validate_key, Bucket, ComposedObject, StorageService, StoredObject},
};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Stores objects as files under `{root}/{bucket}/{key}`.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Creates the storage, making sure every bucket directory exists.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();

        for bucket in [Bucket::Games, Bucket::Images, Bucket::Uploads] {
            fs::create_dir_all(root.join(bucket.as_str())).await?;
        }

        Ok(Self { root })
    }

    fn path_for(&self, bucket: Bucket, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;

        Ok(self.root.join(bucket.as_str()).join(key))
    }

    async fn ensure_parent(path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        Ok(())
    }

    /// Writes `parts` back to back into `out_path`, hashing on the way.
    async fn concat_parts(
        &self,
        out_path: &Path,
        source: Bucket,
        parts: &[String],
    ) -> Result<ComposedObject, StorageError> {
        let mut out = File::create(out_path).await?;
        let mut hasher = Sha256::new();
        let mut size = 0u64;
        let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

        for part in parts {
            let part_path = self.path_for(source, part)?;
            let mut input = File::open(&part_path)
                .await
                .map_err(|e| not_found(e, part))?;

            loop {
                let read = input.read(&mut buffer).await?;
                if read == 0 {
                    break;
                }
                hasher.update(&buffer[..read]);
                out.write_all(&buffer[..read]).await?;
                size += read as u64;
            }
        }

        out.flush().await?;

        Ok(ComposedObject {
            size,
            sha256: hex::encode(hasher.finalize()),
        })
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    PathBuf::from(tmp)
}

fn not_found(err: std::io::Error, key: &str) -> StorageError {
    if err.kind() == ErrorKind::NotFound {
        StorageError::NotFound(key.to_string())
    } else {
        StorageError::Io(err)
    }
}

#[async_trait]
impl StorageService for FsStorage {
    async fn put_object(&self, bucket: Bucket, key: &str, data: Bytes) -> Result<(), StorageError> {
        let path = self.path_for(bucket, key)?;
        Self::ensure_parent(&path).await?;

        // Write beside the target and rename so readers never see a partial object.
        let tmp = temp_path(&path);
        fs::write(&tmp, &data).await?;
        fs::rename(&tmp, &path).await?;

        Ok(())
    }

    async fn open_object(&self, bucket: Bucket, key: &str) -> Result<StoredObject, StorageError> {
        let path = self.path_for(bucket, key)?;

        let file = File::open(&path).await.map_err(|e| not_found(e, key))?;
        let size = file.metadata().await?.len();

        Ok(StoredObject {
            reader: Box::pin(file),
            size,
        })
    }

    async fn compose_object(
        &self,
        dest: Bucket,
        key: &str,
        source: Bucket,
        parts: &[String],
    ) -> Result<ComposedObject, StorageError> {
        let path = self.path_for(dest, key)?;
        Self::ensure_parent(&path).await?;

        let tmp = temp_path(&path);
        let composed = match self.concat_parts(&tmp, source, parts).await {
            Ok(composed) => fs::rename(&tmp, &path)
                .await
                .map(|()| composed)
                .map_err(StorageError::from),
            Err(err) => Err(err),
        };

        if composed.is_err() {
            if let Err(e) = fs::remove_file(&tmp).await {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!("Failed to remove {}: {}", tmp.display(), e);
                }
            }
        }

        composed
    }

    async fn delete_object(&self, bucket: Bucket, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(bucket, key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn object_exists(&self, bucket: Bucket, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(bucket, key)?;

        Ok(fs::try_exists(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage() -> (tempfile::TempDir, FsStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path()).await.unwrap();
        (dir, storage)
    }

    async fn read_all(storage: &FsStorage, bucket: Bucket, key: &str) -> Vec<u8> {
        let mut object = storage.open_object(bucket, key).await.unwrap();
        let mut data = Vec::new();
        object.reader.read_to_end(&mut data).await.unwrap();
        assert_eq!(object.size, data.len() as u64);
        data
    }

    #[tokio::test]
    async fn put_then_open_returns_content() {
        let (_dir, storage) = storage().await;

        storage
            .put_object(Bucket::Images, "covers/1.png", Bytes::from_static(b"png"))
            .await
            .unwrap();

        assert_eq!(read_all(&storage, Bucket::Images, "covers/1.png").await, b"png");
        assert!(storage.object_exists(Bucket::Images, "covers/1.png").await.unwrap());
        assert!(!storage.object_exists(Bucket::Games, "covers/1.png").await.unwrap());
    }

    #[tokio::test]
    async fn open_missing_object_is_not_found() {
        let (_dir, storage) = storage().await;

        let result = storage.open_object(Bucket::Games, "1/1.0.0/game.zip").await;

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn compose_concatenates_parts_in_order() {
        let (_dir, storage) = storage().await;
        storage
            .put_object(Bucket::Uploads, "u1/00000", Bytes::from_static(b"hello "))
            .await
            .unwrap();
        storage
            .put_object(Bucket::Uploads, "u1/00001", Bytes::from_static(b"world"))
            .await
            .unwrap();

        let composed = storage
            .compose_object(
                Bucket::Games,
                "7/1.0.0/game.bin",
                Bucket::Uploads,
                &["u1/00000".to_string(), "u1/00001".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(composed.size, 11);
        assert_eq!(
            composed.sha256,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(
            read_all(&storage, Bucket::Games, "7/1.0.0/game.bin").await,
            b"hello world"
        );
    }

    #[tokio::test]
    async fn compose_with_missing_part_fails() {
        let (dir, storage) = storage().await;
        storage
            .put_object(Bucket::Uploads, "u1/00000", Bytes::from_static(b"hello"))
            .await
            .unwrap();

        let result = storage
            .compose_object(
                Bucket::Games,
                "7/1.0.0/game.bin",
                Bucket::Uploads,
                &["u1/00000".to_string(), "u1/00001".to_string()],
            )
            .await;

        assert!(matches!(result, Err(StorageError::NotFound(_))));
        let game_dir = dir.path().join("games/7/1.0.0");
        assert!(!fs::try_exists(game_dir.join("game.bin")).await.unwrap());
        assert!(!fs::try_exists(game_dir.join("game.bin.part")).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_dir, storage) = storage().await;
        storage
            .put_object(Bucket::Uploads, "u1/00000", Bytes::from_static(b"x"))
            .await
            .unwrap();

        storage.delete_object(Bucket::Uploads, "u1/00000").await.unwrap();
        storage.delete_object(Bucket::Uploads, "u1/00000").await.unwrap();

        assert!(!storage.object_exists(Bucket::Uploads, "u1/00000").await.unwrap());
    }

    #[tokio::test]
    async fn rejects_traversal_keys() {
        let (_dir, storage) = storage().await;

        let result = storage
            .put_object(Bucket::Images, "../escape", Bytes::from_static(b"x"))
            .await;

        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
