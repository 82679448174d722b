//! Domain error types for rmselect
//!
//! - `FetchError` for remote lookups (the only failure the control knows)
//! - `SelectError` for loading the host configuration

use thiserror::Error;

/// Host-side error type for rmselect
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Errors from the remote source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Result type alias for SelectError
pub type Result<T> = std::result::Result<T, SelectError>;

/// Result type alias for FetchError
pub type FetchResult<T> = std::result::Result<T, FetchError>;

impl From<toml::de::Error> for SelectError {
    fn from(err: toml::de::Error) -> Self {
        SelectError::Config(err.to_string())
    }
}
