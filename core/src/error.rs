//! Error types for the student directory client.
//!
//! # Design
//! Validation failures get their own variant so the fetcher can log them
//! without raising a user-facing notification. Every other variant is a
//! transport or decoding failure and is reported to the `Notifier`.

use std::fmt;

/// Errors produced while building, executing, or parsing a student request.
#[derive(Debug)]
pub enum ApiError {
    /// A required query parameter (`entity` or `session_id`) is absent or empty.
    MissingParameter(&'static str),

    /// The client could not be configured, e.g. the base URL is unset.
    Config(String),

    /// The request never produced a response (connection refused, DNS, ...).
    Transport(String),

    /// The server returned a non-2xx status.
    HttpError { status: u16, body: String },

    /// The response body was not a JSON array of records.
    DeserializationError(String),

    /// The query parameters could not be encoded.
    SerializationError(String),
}

impl ApiError {
    /// True for failures caught before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::MissingParameter(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingParameter(name) => write!(f, "missing required parameter: {name}"),
            ApiError::Config(msg) => write!(f, "configuration error: {msg}"),
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
