//! Query and record types for the student directory.
//!
//! # Design
//! `StudentQuery` is what callers hand in: every field optional, exactly as a
//! UI form would supply them. `StudentParams` is the wire form after the
//! required fields are checked and the defaults are resolved. Blank strings
//! and zero numbers count as "not supplied", so `sesi = ""` and `semester = 0`
//! fall back to their defaults the same way an absent value does.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Academic year used when the caller does not pick one.
pub const DEFAULT_SESI: &str = "2024/2025";

/// Semester used when the caller does not pick one.
pub const DEFAULT_SEMESTER: u32 = 1;

/// Offset used when the caller does not pick one.
pub const DEFAULT_OFFSET: u32 = 0;

/// A single student record. The directory owns the schema, so records are
/// passed through untouched.
pub type Student = serde_json::Value;

/// Caller-supplied parameters for a student listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    pub entity: Option<String>,
    pub session_id: Option<String>,
    pub sesi: Option<String>,
    pub semester: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl StudentQuery {
    pub fn new(entity: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            session_id: Some(session_id.into()),
            ..Self::default()
        }
    }

    pub fn sesi(mut self, sesi: impl Into<String>) -> Self {
        self.sesi = Some(sesi.into());
        self
    }

    pub fn semester(mut self, semester: u32) -> Self {
        self.semester = Some(semester);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Check that both required fields are present and non-blank.
    pub fn validate(&self) -> Result<(), ApiError> {
        if present(&self.entity).is_none() {
            return Err(ApiError::MissingParameter("entity"));
        }
        if present(&self.session_id).is_none() {
            return Err(ApiError::MissingParameter("session_id"));
        }
        Ok(())
    }

    /// Validate and resolve defaults into the wire form.
    pub fn params(&self) -> Result<StudentParams, ApiError> {
        self.validate()?;
        Ok(StudentParams {
            entity: present(&self.entity).unwrap_or_default().to_string(),
            session_id: present(&self.session_id).unwrap_or_default().to_string(),
            sesi: present(&self.sesi).unwrap_or(DEFAULT_SESI).to_string(),
            semester: self.semester.filter(|&s| s != 0).unwrap_or(DEFAULT_SEMESTER),
            limit: self.limit.filter(|&l| l != 0),
            offset: self.offset.unwrap_or(DEFAULT_OFFSET),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Query parameters as sent on the wire. `limit` is left out of the query
/// string entirely when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentParams {
    pub entity: String,
    pub session_id: String,
    pub sesi: String,
    pub semester: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    pub offset: u32,
}
