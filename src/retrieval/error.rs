// src/retrieval/error.rs
//! Failures of the external retrieval service.

use thiserror::Error;

/// Transport, status or payload failure while fetching a feed.
///
/// `Display` is the single human-readable message shown to the operator.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The service answered with a non-success status.
    #[error("Server Error: {reason}")]
    Status { status: u16, reason: String },

    /// Connection, timeout or other transport failure.
    #[error("Failed to connect to backend: {0}")]
    Transport(#[source] reqwest::Error),

    /// The body was not a JSON array of records.
    #[error("Malformed response from backend: {0}")]
    Decode(String),

    /// No retrieval backend is configured for this feed.
    #[error("No data source configured for {0}")]
    Unavailable(String),
}

impl RetrievalError {
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
        }
    }

    /// Message surfaced to the view's error state.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for RetrievalError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_uses_reason_phrase() {
        let e = RetrievalError::status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.user_message(), "Server Error: Internal Server Error");
        assert!(matches!(e, RetrievalError::Status { status: 500, .. }));
    }
}
