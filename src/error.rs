use thiserror::Error;

/// Errors that can occur while talking to the recipe API or setting up a session
#[derive(Error, Debug)]
pub enum QuickBiteError {
    /// Network unreachable, timeout, or a non-2xx response
    #[error("Failed to fetch from recipe API: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the expected `{ "meals": ... }` envelope
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Invalid user-supplied argument (unknown filter dimension, empty id, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<serde_json::Error> for QuickBiteError {
    fn from(err: serde_json::Error) -> Self {
        QuickBiteError::MalformedPayload(err.to_string())
    }
}
