//! Install, update and uninstall of owned games.
//!
//! A game lives in `{install_dir}/{game_id}/`. Downloads land in a `.download`
//! sub-directory first and only move into place once their size and SHA-256 match the
//! version record.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::Utc;
use forja::version;

use crate::{
    client::ForjaClient,
    error::LauncherError,
    manifest::{InstalledGame, Manifest},
};

const DOWNLOAD_DIR: &str = ".download";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    NotInstalled,
    /// Installed, but the game no longer has a released version.
    NoRelease,
    UpToDate { version: String },
    UpdateAvailable { local: String, remote: String },
}

pub struct Installer<'a> {
    client: &'a ForjaClient,
    install_dir: PathBuf,
}

impl<'a> Installer<'a> {
    pub fn new(client: &'a ForjaClient, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            install_dir: install_dir.into(),
        }
    }

    pub fn game_dir(&self, game_id: i32) -> PathBuf {
        self.install_dir.join(game_id.to_string())
    }

    pub async fn installed(&self, game_id: i32) -> Result<Option<InstalledGame>, LauncherError> {
        Ok(Manifest::load(&self.install_dir)
            .await?
            .get(game_id)
            .cloned())
    }

    /// Compares the installed version with the latest release.
    pub async fn check_update(&self, game_id: i32) -> Result<UpdateStatus, LauncherError> {
        let Some(installed) = self.installed(game_id).await? else {
            return Ok(UpdateStatus::NotInstalled);
        };

        let status = match self.client.latest_version(game_id).await? {
            None => UpdateStatus::NoRelease,
            Some(latest) if version::is_newer(&latest.version, &installed.version) => {
                UpdateStatus::UpdateAvailable {
                    local: installed.version,
                    remote: latest.version,
                }
            }
            Some(_) => UpdateStatus::UpToDate {
                version: installed.version,
            },
        };

        Ok(status)
    }

    /// Downloads, verifies and installs the latest version of a game.
    ///
    /// # Arguments
    /// - `game_id` - Owned game to install
    /// - `progress` - Called with bytes written and the expected total
    ///
    /// # Returns
    /// - `Ok(InstalledGame)` - Manifest entry for the new install
    /// - `Err(LauncherError::NoRelease)` - The game has no released version
    /// - `Err(LauncherError::SizeMismatch | HashMismatch)` - Download failed verification
    pub async fn install(
        &self,
        game_id: i32,
        progress: impl FnMut(u64, Option<u64>),
    ) -> Result<InstalledGame, LauncherError> {
        let latest = self
            .client
            .latest_version(game_id)
            .await?
            .ok_or(LauncherError::NoRelease(game_id))?;
        validate_file_name(&latest.file_name)?;

        let game_dir = self.game_dir(game_id);
        let staging = game_dir.join(DOWNLOAD_DIR);
        tokio::fs::create_dir_all(&staging).await?;
        let partial = staging.join(&latest.file_name);

        let downloaded = match self
            .client
            .download_version(game_id, latest.id, &partial, progress)
            .await
        {
            Ok(downloaded) => downloaded,
            Err(err) => {
                remove_quietly(&staging).await;
                return Err(err);
            }
        };

        let expected_size = latest.file_size.max(0) as u64;
        if downloaded.size != expected_size {
            remove_quietly(&staging).await;
            return Err(LauncherError::SizeMismatch {
                expected: expected_size,
                actual: downloaded.size,
            });
        }
        if !downloaded.sha256.eq_ignore_ascii_case(&latest.file_hash) {
            remove_quietly(&staging).await;
            return Err(LauncherError::HashMismatch {
                expected: latest.file_hash,
                actual: downloaded.sha256,
            });
        }

        let mut manifest = Manifest::load(&self.install_dir).await?;
        if let Some(previous) = manifest.get(game_id) {
            if previous.file_name != latest.file_name {
                remove_quietly(&game_dir.join(&previous.file_name)).await;
            }
        }

        let target = game_dir.join(&latest.file_name);
        tokio::fs::rename(&partial, &target).await?;
        remove_quietly(&staging).await;
        mark_executable(&target).await?;

        let installed = InstalledGame {
            version: latest.version,
            version_id: latest.id,
            file_name: latest.file_name,
            installed_at: Utc::now(),
        };
        manifest.games.insert(game_id, installed.clone());
        manifest.save(&self.install_dir).await?;

        tracing::info!("Installed game {} version {}", game_id, installed.version);

        Ok(installed)
    }

    /// Installs the latest version when it is newer than the installed one.
    ///
    /// # Returns
    /// - `Ok(Some(InstalledGame))` - Updated install
    /// - `Ok(None)` - Already up to date, or nothing released
    /// - `Err(LauncherError::NotInstalled)` - Game is not installed
    pub async fn update(
        &self,
        game_id: i32,
        progress: impl FnMut(u64, Option<u64>),
    ) -> Result<Option<InstalledGame>, LauncherError> {
        match self.check_update(game_id).await? {
            UpdateStatus::NotInstalled => Err(LauncherError::NotInstalled(game_id)),
            UpdateStatus::UpdateAvailable { .. } => {
                Ok(Some(self.install(game_id, progress).await?))
            }
            UpdateStatus::UpToDate { .. } | UpdateStatus::NoRelease => Ok(None),
        }
    }

    pub async fn uninstall(&self, game_id: i32) -> Result<(), LauncherError> {
        let mut manifest = Manifest::load(&self.install_dir).await?;
        if manifest.games.remove(&game_id).is_none() {
            return Err(LauncherError::NotInstalled(game_id));
        }

        match tokio::fs::remove_dir_all(self.game_dir(game_id)).await {
            Err(err) if err.kind() != ErrorKind::NotFound => return Err(err.into()),
            _ => {}
        }
        manifest.save(&self.install_dir).await?;

        tracing::info!("Uninstalled game {}", game_id);

        Ok(())
    }
}

/// File names come from the server; anything that could leave the game directory is
/// refused.
fn validate_file_name(name: &str) -> Result<(), LauncherError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name == DOWNLOAD_DIR
        || name.contains(|c: char| matches!(c, '/' | '\\' | '\0'));

    if invalid {
        return Err(LauncherError::InvalidFileName(name.to_string()));
    }

    Ok(())
}

async fn remove_quietly(path: &Path) {
    let result = match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => tokio::fs::remove_dir_all(path).await,
        Ok(_) => tokio::fs::remove_file(path).await,
        Err(_) => return,
    };

    if let Err(err) = result {
        tracing::warn!("Failed to remove {}: {}", path.display(), err);
    }
}

#[cfg(unix)]
async fn mark_executable(path: &Path) -> Result<(), LauncherError> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = tokio::fs::metadata(path).await?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    tokio::fs::set_permissions(path, permissions).await?;

    Ok(())
}

#[cfg(not(unix))]
async fn mark_executable(_path: &Path) -> Result<(), LauncherError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::tests::{client, version};

    async fn serve_release(server: &MockServer, game_id: i32, id: i32, number: &str, body: &[u8]) {
        serve_release_with_record(server, version(game_id, id, number, body), body).await;
    }

    async fn serve_release_with_record(
        server: &MockServer,
        record: forja::model::game::GameVersionDto,
        body: &[u8],
    ) {
        Mock::given(method("GET"))
            .and(path(format!("/api/games/{}/versions/latest", record.game_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(&record))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!(
                "/api/games/{}/versions/{}/download",
                record.game_id, record.id
            )))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn installs_verified_download() {
        let server = MockServer::start().await;
        serve_release(&server, 4, 11, "1.0.0", b"build one").await;
        let dir = tempfile::tempdir().unwrap();
        let client = client(&server);
        let installer = Installer::new(&client, dir.path());

        let installed = installer.install(4, |_, _| {}).await.unwrap();

        assert_eq!(installed.version, "1.0.0");
        assert_eq!(installed.version_id, 11);
        let file = dir.path().join("4").join("game.bin");
        assert_eq!(tokio::fs::read(&file).await.unwrap(), b"build one");
        assert!(!dir.path().join("4").join(DOWNLOAD_DIR).exists());
        assert_eq!(installer.installed(4).await.unwrap(), Some(installed));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&file).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[tokio::test]
    async fn rejects_corrupted_download() {
        let server = MockServer::start().await;
        let record = version(5, 12, "1.0.0", b"expected bytes!");
        serve_release_with_record(&server, record, b"tampered bytes!").await;
        let dir = tempfile::tempdir().unwrap();
        let client = client(&server);
        let installer = Installer::new(&client, dir.path());

        let result = installer.install(5, |_, _| {}).await;

        assert!(matches!(result, Err(LauncherError::HashMismatch { .. })));
        assert!(!dir.path().join("5").join(DOWNLOAD_DIR).exists());
        assert!(!dir.path().join("5").join("game.bin").exists());
        assert_eq!(installer.installed(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_truncated_download() {
        let server = MockServer::start().await;
        let record = version(5, 12, "1.0.0", b"the full build");
        serve_release_with_record(&server, record, b"the full").await;
        let dir = tempfile::tempdir().unwrap();
        let client = client(&server);
        let installer = Installer::new(&client, dir.path());

        let result = installer.install(5, |_, _| {}).await;

        assert!(matches!(
            result,
            Err(LauncherError::SizeMismatch {
                expected: 14,
                actual: 8
            })
        ));
    }

    #[tokio::test]
    async fn refuses_path_in_file_name() {
        let server = MockServer::start().await;
        let mut record = version(6, 13, "1.0.0", b"x");
        record.file_name = "../escape.sh".to_string();
        serve_release_with_record(&server, record, b"x").await;
        let dir = tempfile::tempdir().unwrap();
        let client = client(&server);

        let result = Installer::new(&client, dir.path()).install(6, |_, _| {}).await;

        assert!(matches!(result, Err(LauncherError::InvalidFileName(_))));
    }

    #[tokio::test]
    async fn reports_update_states() {
        let server = MockServer::start().await;
        serve_release(&server, 8, 20, "1.10.0", b"new build").await;
        Mock::given(method("GET"))
            .and(path("/api/games/9/versions/latest"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let client = client(&server);
        let installer = Installer::new(&client, dir.path());

        assert_eq!(
            installer.check_update(8).await.unwrap(),
            UpdateStatus::NotInstalled
        );

        let mut manifest = Manifest::default();
        for game_id in [8, 9] {
            manifest.games.insert(
                game_id,
                InstalledGame {
                    version: "1.9.0".to_string(),
                    version_id: 1,
                    file_name: "game.bin".to_string(),
                    installed_at: Utc::now(),
                },
            );
        }
        manifest.save(dir.path()).await.unwrap();

        assert_eq!(
            installer.check_update(8).await.unwrap(),
            UpdateStatus::UpdateAvailable {
                local: "1.9.0".to_string(),
                remote: "1.10.0".to_string(),
            }
        );
        assert_eq!(
            installer.check_update(9).await.unwrap(),
            UpdateStatus::NoRelease
        );

        let updated = installer.update(8, |_, _| {}).await.unwrap();
        assert_eq!(updated.map(|game| game.version), Some("1.10.0".to_string()));
        assert_eq!(
            installer.check_update(8).await.unwrap(),
            UpdateStatus::UpToDate {
                version: "1.10.0".to_string()
            }
        );
        assert_eq!(installer.update(8, |_, _| {}).await.unwrap(), None);
    }

    #[tokio::test]
    async fn uninstall_removes_files_and_entry() {
        let server = MockServer::start().await;
        serve_release(&server, 3, 7, "2.0.0", b"build").await;
        let dir = tempfile::tempdir().unwrap();
        let client = client(&server);
        let installer = Installer::new(&client, dir.path());
        installer.install(3, |_, _| {}).await.unwrap();

        installer.uninstall(3).await.unwrap();

        assert!(!dir.path().join("3").exists());
        assert_eq!(installer.installed(3).await.unwrap(), None);
        assert!(matches!(
            installer.uninstall(3).await,
            Err(LauncherError::NotInstalled(3))
        ));
    }

    #[test]
    fn validates_file_names() {
        assert!(validate_file_name("lanternfall.x86_64").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("bin/game").is_err());
        assert!(validate_file_name("..\\game.exe").is_err());
    }
}
