//! Record of installed games, kept as `installed.json` in the install directory.

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LauncherError;

pub const MANIFEST_FILE: &str = "installed.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InstalledGame {
    pub version: String,
    pub version_id: i32,
    /// Executable inside `{install_dir}/{game_id}/`.
    pub file_name: String,
    pub installed_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    #[serde(default)]
    pub games: BTreeMap<i32, InstalledGame>,
}

impl Manifest {
    pub fn path(install_dir: &Path) -> PathBuf {
        install_dir.join(MANIFEST_FILE)
    }

    /// Reads the manifest; a missing file is an empty manifest.
    pub async fn load(install_dir: &Path) -> Result<Self, LauncherError> {
        match tokio::fs::read_to_string(Self::path(install_dir)).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes to a temporary file and renames it over the manifest.
    pub async fn save(&self, install_dir: &Path) -> Result<(), LauncherError> {
        tokio::fs::create_dir_all(install_dir).await?;

        let path = Self::path(install_dir);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(self)?).await?;
        tokio::fs::rename(&tmp, &path).await?;

        Ok(())
    }

    pub fn get(&self, game_id: i32) -> Option<&InstalledGame> {
        self.games.get(&game_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed(version: &str) -> InstalledGame {
        InstalledGame {
            version: version.to_string(),
            version_id: 1,
            file_name: "game.bin".to_string(),
            installed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        let manifest = Manifest::load(dir.path()).await.unwrap();

        assert!(manifest.games.is_empty());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = Manifest::default();
        manifest.games.insert(7, installed("1.4.0"));

        manifest.save(dir.path()).await.unwrap();
        let loaded = Manifest::load(dir.path()).await.unwrap();

        assert_eq!(loaded, manifest);
        assert!(!dir.path().join("installed.json.tmp").exists());
    }

    #[tokio::test]
    async fn rejects_corrupt_manifest() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(MANIFEST_FILE), "{not json")
            .await
            .unwrap();

        let result = Manifest::load(dir.path()).await;

        assert!(matches!(result, Err(LauncherError::Manifest(_))));
    }
}
