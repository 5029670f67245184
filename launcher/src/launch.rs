use std::{path::PathBuf, process::ExitStatus, time::Instant};

use forja::model::library::MAX_PLAY_SESSION_SECONDS;

use crate::{client::ForjaClient, error::LauncherError, manifest::Manifest};

/// Outcome of one play session.
#[derive(Debug)]
pub struct PlaySession {
    pub status: ExitStatus,
    /// Wall-clock time the game ran, capped at one day.
    pub seconds: i64,
    /// Whether the server accepted the play time report.
    pub reported: bool,
}

pub struct GameRunner<'a> {
    client: &'a ForjaClient,
    install_dir: PathBuf,
}

impl<'a> GameRunner<'a> {
    pub fn new(client: &'a ForjaClient, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            install_dir: install_dir.into(),
        }
    }

    /// Runs an installed game until it exits, then reports the time played.
    ///
    /// The game starts in its install directory. Sessions shorter than a second are not
    /// reported, and a failed report is logged without failing the session.
    pub async fn play(&self, game_id: i32, args: &[String]) -> Result<PlaySession, LauncherError> {
        let manifest = Manifest::load(&self.install_dir).await?;
        let installed = manifest
            .get(game_id)
            .ok_or(LauncherError::NotInstalled(game_id))?;

        let game_dir = self.install_dir.join(game_id.to_string());
        let executable = game_dir.join(&installed.file_name);

        tracing::info!("Starting game {} ({})", game_id, installed.version);
        let started = Instant::now();
        let status = tokio::process::Command::new(&executable)
            .args(args)
            .current_dir(&game_dir)
            .status()
            .await?;
        let seconds = (started.elapsed().as_secs() as i64).min(MAX_PLAY_SESSION_SECONDS);

        tracing::info!("Game {} exited with {} after {}s", game_id, status, seconds);

        let mut reported = false;
        if seconds >= 1 {
            match self.client.report_play_time(game_id, seconds).await {
                Ok(_) => reported = true,
                Err(err) => tracing::warn!("Failed to report play time for game {}: {}", game_id, err),
            }
        }

        Ok(PlaySession {
            status,
            seconds,
            reported,
        })
    }
}
