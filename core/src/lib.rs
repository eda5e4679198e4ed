//! Client for a remote student directory.
//!
//! # Overview
//! Fetches one page of student records for an entity and session token.
//! Request building and response parsing live in `StudentsClient` and never
//! touch the network (host-does-IO pattern). `StudentFetcher` executes those
//! requests with `reqwest` and turns every failure into an empty list.
//!
//! # Design
//! - `StudentsClient` is stateless, it holds only `base_url`.
//! - `build_list_students` / `parse_list_students` keep the I/O boundary
//!   explicit, so the same code can be driven from a blocking host.
//! - Records are opaque `serde_json::Value`s; the directory owns the schema.
//! - User-facing notifications go through the `Notifier` trait.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod types;

pub use client::StudentsClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use fetch::{LogNotifier, Notifier, StudentFetcher, FETCH_ERROR_MESSAGE, NOTIFY_TARGET};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    Student, StudentParams, StudentQuery, DEFAULT_OFFSET, DEFAULT_SEMESTER, DEFAULT_SESI,
};
