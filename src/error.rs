// Error types for the devcards service.
// Handles upstream API errors, cache errors, and general application errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::CacheError;

#[derive(Error, Debug)]
pub enum DevcardsError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Missing {0} environment variable")]
    MissingToken(&'static str),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Failure reported by an upstream provider API.
///
/// Carries a human-readable message, the underlying cause, and an HTTP-style
/// status code. This shape is serializable so a producer may cache it like any
/// other record; the cache layer never originates one.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[error("{message} ({status})")]
pub struct UpstreamError {
    pub message: String,
    pub cause: String,
    pub status: u16,
}

impl UpstreamError {
    pub fn new(message: impl Into<String>, cause: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
            status,
        }
    }
}

pub type Result<T> = std::result::Result<T, DevcardsError>;
