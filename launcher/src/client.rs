use std::path::Path;

use forja::{
    model::{
        game::GameVersionDto,
        library::{LibraryEntryDto, PlayTimeDto},
    },
    retry::{is_transient_reqwest, retry, RetryPolicy},
};
use reqwest::{Method, Response, StatusCode};
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::{config::LauncherConfig, error::LauncherError};

/// Size and SHA-256 of a file written by `ForjaClient::download_version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub size: u64,
    /// Lowercase hex.
    pub sha256: String,
}

/// Client for the launcher-facing part of the Forja API.
///
/// Every request carries the configured bearer token. Reads are retried with backoff on
/// timeouts, connection failures, 5xx and 429 responses; play time reports are sent once.
pub struct ForjaClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    retry: RetryPolicy,
}

impl ForjaClient {
    pub fn new(config: &LauncherConfig) -> Result<Self, LauncherError> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(concat!("forja-launcher/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            token: config.token.clone(),
            retry: config.retry,
        })
    }

    /// Games owned by the token's user.
    pub async fn library(&self) -> Result<Vec<LibraryEntryDto>, LauncherError> {
        let response = self.send(Method::GET, "/api/library", None, self.retry).await?;

        Ok(response.json().await?)
    }

    /// Highest released version of a game.
    ///
    /// # Returns
    /// - `Ok(Some(version))` - Latest version record
    /// - `Ok(None)` - The game has no released version
    pub async fn latest_version(
        &self,
        game_id: i32,
    ) -> Result<Option<GameVersionDto>, LauncherError> {
        let path = format!("/api/games/{}/versions/latest", game_id);

        match self.send(Method::GET, &path, None, self.retry).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Streams a version's binary into `dest`, hashing it on the way.
    ///
    /// `progress` is called after every chunk with the bytes written so far and the
    /// total when the server announced one. Only the request is retried; a transfer
    /// that breaks midway fails and leaves the partial file for the caller to remove.
    pub async fn download_version(
        &self,
        game_id: i32,
        version_id: i32,
        dest: &Path,
        mut progress: impl FnMut(u64, Option<u64>),
    ) -> Result<DownloadedFile, LauncherError> {
        let path = format!("/api/games/{}/versions/{}/download", game_id, version_id);
        let mut response = self.send(Method::GET, &path, None, self.retry).await?;
        let total = response.content_length();

        let mut file = tokio::fs::File::create(dest).await?;
        let mut hasher = Sha256::new();
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            hasher.update(&chunk);
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            progress(written, total);
        }

        file.flush().await?;
        file.sync_all().await?;

        Ok(DownloadedFile {
            size: written,
            sha256: hex::encode(hasher.finalize()),
        })
    }

    /// Adds `seconds` to the game's play time. Sent once, without retries.
    pub async fn report_play_time(
        &self,
        game_id: i32,
        seconds: i64,
    ) -> Result<LibraryEntryDto, LauncherError> {
        let path = format!("/api/library/{}/playtime", game_id);
        let body = serde_json::to_value(PlayTimeDto { seconds })?;

        let response = self
            .send(Method::POST, &path, Some(body), RetryPolicy::none())
            .await?;

        Ok(response.json().await?)
    }

    /// Sends a request under `policy` and turns error statuses into errors.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        policy: RetryPolicy,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);

        retry(&policy, is_transient_reqwest, || {
            let mut request = self.http.request(method.clone(), &url);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }
            if let Some(body) = &body {
                request = request.json(body);
            }

            async move { request.send().await?.error_for_status() }
        })
        .await
    }
}
