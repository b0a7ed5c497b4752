//! Error types for the board API client.
//!
//! # Design
//! Every non-2xx response lands in `Status` together with the normalized
//! body, so callers pattern-match on the variant and ask for the server's
//! `message` instead of probing an untyped payload.

use crate::http::ResponseBody;

/// Errors returned by `BoardClient` parse methods and by transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {}", .body.message().unwrap_or("API error"))]
    Status { status: u16, body: ResponseBody },

    /// No response was received (connection refused, DNS failure, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A 2xx body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The server-supplied message carried by a `Status` error.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => body.message(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
