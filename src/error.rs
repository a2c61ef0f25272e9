//! Error taxonomy for the client core.
//!
//! Three families cover every failure this crate can see:
//!
//! - [`ClientError::Network`] — the backend was unreachable or answered
//!   with a non-success status.
//! - [`ClientError::NotFound`] — a thread has no history to load.
//! - [`ClientError::Persistence`] — the durable store failed; by policy
//!   these are logged and recovered locally, never shown as a frozen UI.
//!
//! Send and history-load failures are converted by the session
//! controller into a synthetic assistant-authored error message in the
//! transcript, so nothing here is fatal to the embedding process.

use thiserror::Error;

use crate::traits::{HttpError, StoreError};

/// Unified error type for repository and session operations.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The remote API was unreachable or returned a non-success status.
    #[error("network error: {message}")]
    Network {
        message: String,
        /// HTTP status, when the failure was a decoded response
        status: Option<u16>,
    },

    /// The requested thread has no retrievable history.
    #[error("thread '{thread_id}' not found")]
    NotFound { thread_id: String },

    /// The durable store failed a read or write.
    #[error("persistence error: {message}")]
    Persistence { message: String },
}

impl ClientError {
    /// Build a network error from a status code and body text.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Check if retrying the same operation could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network { status, .. } => match status {
                Some(code) => *code >= 500 || *code == 429 || *code == 408,
                None => true, // transport failure, worth retrying
            },
            ClientError::NotFound { .. } => false,
            ClientError::Persistence { .. } => true,
        }
    }

    /// A short, user-readable description of the failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network { status, .. } => match status {
                Some(429) => "Too many requests. Please wait a moment and try again.".to_string(),
                Some(code) if *code >= 500 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                Some(code) => format!("The server returned an error (HTTP {}).", code),
                None => {
                    "Unable to connect to the server. Please check your internet connection."
                        .to_string()
                }
            },
            ClientError::NotFound { .. } => "This conversation has no messages yet.".to_string(),
            ClientError::Persistence { .. } => {
                "Your conversation could not be saved, but you can keep chatting.".to_string()
            }
        }
    }
}

impl From<HttpError> for ClientError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => ClientError::Network {
                message,
                status: Some(status),
            },
            other => ClientError::Network {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        ClientError::Persistence {
            message: err.to_string(),
        }
    }
}
