//! Error types for the users API client.
//!
//! # Design
//! Three failure classes reach callers: the round-trip never completed
//! (`Transport`), the server answered with a non-2xx status (`HttpStatus`),
//! or it answered 2xx with a body that does not match the expected envelope
//! (`MalformedResponse`). `HttpStatus` carries a ready-made `message` so the
//! presentation layer never has to look at status codes or error bodies.

use thiserror::Error;

/// Errors returned by `UsersClient` parse methods and `UsersApi` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The HTTP call itself could not complete (DNS, refused connection, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server responded with a status outside 200..=299.
    #[error("{message}")]
    HttpStatus {
        code: u16,
        status_text: String,
        message: String,
    },

    /// A 2xx response whose body did not hold the expected `data`.
    #[error("invalid response format: {0}")]
    MalformedResponse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of an `HttpStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
