//! Error handling and custom error types
//!
//! Provides unified error handling across the service using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    EmptyResponse(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    /// A remote failure wrapped at the studio boundary.
    #[error("Internal server error during {operation}: {message}")]
    RemoteCall {
        operation: &'static str,
        message: String,
    },
}

impl Error {
    /// Failures raised while talking to the remote model: transport errors,
    /// provider rejections and replies that could not be decoded.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Http(_) | Error::AiProvider(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
