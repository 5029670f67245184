use std::path::PathBuf;

use forja::retry::RetryPolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

pub struct LauncherConfig {
    /// Base URL of the Forja API, without a trailing slash.
    pub api_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Directory holding one sub-directory per installed game plus the manifest.
    pub install_dir: PathBuf,
    pub retry: RetryPolicy,
}

impl LauncherConfig {
    pub fn new(api_url: &str, token: Option<String>, install_dir: PathBuf) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.trim().is_empty()),
            install_dir,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_url_and_token() {
        let config = LauncherConfig::new("http://api.test/", Some("  ".to_string()), "games".into());

        assert_eq!(config.api_url, "http://api.test");
        assert!(config.token.is_none());
        assert_eq!(config.retry, RetryPolicy::default());
    }
}
