use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Game {0} is not installed")]
    NotInstalled(i32),

    #[error("Game {0} has no released version")]
    NoRelease(i32),

    #[error("Refusing to install file named '{0}'")]
    InvalidFileName(String),

    /// The downloaded file has a different length than the version record.
    #[error("Size mismatch: expected {expected} bytes, downloaded {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// The downloaded file does not hash to the version record's SHA-256.
    #[error("Checksum mismatch: expected {expected}, downloaded {actual}")]
    HashMismatch { expected: String, actual: String },
}
