use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The `error` object of a failed response envelope.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Coarse failure categories callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad or expired credential (HTTP 401).
    Authentication,
    /// The addressed resource does not exist (HTTP 404).
    NotFound,
    /// Quota or request frequency exceeded (HTTP 429).
    RateLimit,
    /// Any other remote, transport or decoding failure.
    Service,
    /// A client-side precondition failed; nothing was sent.
    Validation,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid API key")]
    Authentication,

    #[error("Resource not found")]
    NotFound,

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("{}", .0.message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Service(ApiError),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse or serialize JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Header error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("The client has been closed")]
    Closed,
}

pub(crate) const UNKNOWN_ERROR: &str = "Unknown error";

impl Error {
    /// The failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication => ErrorKind::Authentication,
            Self::NotFound => ErrorKind::NotFound,
            Self::RateLimit => ErrorKind::RateLimit,
            Self::Validation(_) | Self::Url(_) | Self::Header(_) => ErrorKind::Validation,
            Self::Api { .. }
            | Self::Service(_)
            | Self::Http(_)
            | Self::Serialization(_)
            | Self::Closed => ErrorKind::Service,
        }
    }

    /// HTTP status of the failed response, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Authentication => Some(StatusCode::UNAUTHORIZED),
            Self::NotFound => Some(StatusCode::NOT_FOUND),
            Self::RateLimit => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Maps a non-success HTTP status to its error.
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Authentication,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit,
            _ => Self::Api { status, body },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
