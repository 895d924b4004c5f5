//! Error types for the client

use thiserror::Error;

/// Errors raised while dispatching requests
///
/// Builders never fail; only the transport, the configuration layer and
/// request dispatch produce errors. A response the engine sent back with an
/// error envelope is not an `Error`, it decodes to
/// [`Decoded::Failure`](crate::parser::Decoded::Failure).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}
