use std::error::Error as StdError;

use thiserror::Error;

/// Echoscribe's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Echoscribe's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// The staged file was rejected before submission. Purely local; nothing
    /// was sent to the backend.
    #[error("{reason}")]
    Validation { reason: String },

    /// A second `submit` was attempted while one was still pending.
    #[error("an upload is already in flight")]
    UploadInFlight,

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The transfer itself failed (connect, TLS, timeout, mid-body drop).
    #[error("upload transport failed: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The backend answered 2xx but the body did not match the transcript schema.
    #[error("malformed transcript response: {detail}")]
    MalformedResponse { detail: String },

    /// Clipboard write failed. Best-effort by contract, never fatal.
    #[error("clipboard write failed: {detail}")]
    Clipboard { detail: String },

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// Whether this error belongs to the upload class (transport, status, or
    /// schema failure). The UI surfaces these uniformly as a retry prompt.
    pub fn is_upload_failure(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Transport(..) | Self::MalformedResponse { .. }
        )
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
