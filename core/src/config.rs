//! Client configuration.

use crate::error::ApiError;

/// Environment variable holding the directory endpoint.
pub const BASE_URL_ENV: &str = "STUDENTS_BASE_URL";

/// Where the student directory lives.
///
/// `base_url` is the full listing endpoint; query parameters are appended to
/// it as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from `STUDENTS_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Ok(Self::new(url.trim())),
            _ => Err(ApiError::Config(format!("{BASE_URL_ENV} is not set"))),
        }
    }
}
