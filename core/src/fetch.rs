//! Async executor for `StudentsClient` requests.
//!
//! # Design
//! `StudentFetcher` is the host in the host-does-IO split: it asks
//! `StudentsClient` for an `HttpRequest`, runs it with `reqwest`, and hands
//! the `HttpResponse` back for parsing. `get_students` is the boundary that
//! callers use. It never fails; every error is logged and turned into an
//! empty list, and transport or decoding errors are also pushed to the
//! `Notifier` so the user sees them.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::client::StudentsClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Student, StudentQuery};

/// Message shown to the user when a listing could not be fetched.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching student data";

/// Sink for user-facing error messages (a toast, a status bar, ...).
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Log target used by `LogNotifier`.
pub const NOTIFY_TARGET: &str = "students::notify";

/// Default notifier for callers without a UI.
///
/// Writes the user-facing message at `info` under `NOTIFY_TARGET`. The
/// failure itself is already logged at `error` by `get_students`, so this
/// channel carries only what the user would have seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, message: &str) {
        info!(target: NOTIFY_TARGET, "{message}");
    }
}

/// Fetches student listings over HTTP.
///
/// Cheap to clone; clones share the connection pool and the notifier.
#[derive(Clone)]
pub struct StudentFetcher {
    http: reqwest::Client,
    client: StudentsClient,
    notifier: Arc<dyn Notifier>,
}

impl StudentFetcher {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            client: StudentsClient::new(&config.base_url),
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Fetch the students matching `query`, degrading to an empty list on
    /// any failure.
    pub async fn get_students(&self, query: &StudentQuery) -> Vec<Student> {
        match self.try_get_students(query).await {
            Ok(students) => students,
            Err(err) if err.is_validation() => {
                warn!(error = %err, "missing session_id or entity, skipping request");
                Vec::new()
            }
            Err(err) => {
                error!(error = %err, "error fetching student data");
                self.notifier.notify_error(FETCH_ERROR_MESSAGE);
                Vec::new()
            }
        }
    }

    /// Like `get_students`, but returns the error instead of absorbing it.
    /// Nothing is logged or notified here.
    pub async fn try_get_students(&self, query: &StudentQuery) -> Result<Vec<Student>, ApiError> {
        let request = self.client.build_list_students(query)?;
        debug!(
            base_url = self.client.base_url(),
            entity = query.entity.as_deref().unwrap_or_default(),
            "sending request"
        );
        let response = self.execute(request).await?;
        let students = self.client.parse_list_students(response)?;
        debug!(count = students.len(), "fetched students");
        Ok(students)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for StudentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentFetcher")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}
