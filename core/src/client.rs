//! Stateless HTTP request builder and response parser for the student
//! directory.
//!
//! # Design
//! `StudentsClient` holds only a `base_url`. Listing is split into
//! `build_list_students`, which validates the query and produces an
//! `HttpRequest`, and `parse_list_students`, which consumes an
//! `HttpResponse`. The caller executes the HTTP round-trip in between.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Student, StudentQuery};

/// Synchronous, stateless client for the student directory.
#[derive(Debug, Clone)]
pub struct StudentsClient {
    base_url: String,
}

impl StudentsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate `query` and describe the GET request for it.
    ///
    /// Fails with `MissingParameter` before anything is built when `entity`
    /// or `session_id` is absent.
    pub fn build_list_students(&self, query: &StudentQuery) -> Result<HttpRequest, ApiError> {
        let params = query.params()?;
        let qs = serde_urlencoded::to_string(&params)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}?{qs}", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        })
    }

    /// Decode a listing response.
    ///
    /// A blank body or a falsy JSON value (`null`, `false`, `0`, `""`) is an
    /// empty list. An array is returned as-is; any other shape is an error.
    pub fn parse_list_students(&self, response: HttpResponse) -> Result<Vec<Student>, ApiError> {
        if !response.is_success() {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        match value {
            Value::Array(students) => Ok(students),
            value if is_falsy(&value) => Ok(Vec::new()),
            other => Err(ApiError::DeserializationError(format!(
                "expected an array of students, got {}",
                kind(&other)
            ))),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StudentsClient {
        StudentsClient::new("http://localhost:3000/students")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_uses_defaults_for_unset_fields() {
        let req = client()
            .build_list_students(&StudentQuery::new("fsktm", "abc123"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:3000/students?entity=fsktm&session_id=abc123&sesi=2024%2F2025&semester=1&offset=0"
        );
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_includes_limit_when_set() {
        let query = StudentQuery::new("fsktm", "abc123").semester(2).limit(10).offset(20);
        let req = client().build_list_students(&query).unwrap();
        assert!(req.url.ends_with("&semester=2&limit=10&offset=20"));
    }

    #[test]
    fn build_rejects_missing_session_id() {
        let query = StudentQuery {
            session_id: None,
            ..StudentQuery::new("fsktm", "")
        };
        let err = client().build_list_students(&query).unwrap_err();
        assert!(matches!(err, ApiError::MissingParameter("session_id")));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = StudentsClient::new("http://localhost:3000/students/");
        assert_eq!(client.base_url(), "http://localhost:3000/students");
    }

    #[test]
    fn parse_returns_records_unchanged() {
        let body = r#"[{"name":"Aina","matric":"A1","extra":{"gpa":3.9}},{"name":"Badrul"}]"#;
        let students = client().parse_list_students(ok(body)).unwrap();
        let expected: Vec<Student> = serde_json::from_str(body).unwrap();
        assert_eq!(students, expected);
    }

    #[test]
    fn parse_null_body_is_empty() {
        assert!(client().parse_list_students(ok("null")).unwrap().is_empty());
    }

    #[test]
    fn parse_falsy_bodies_are_empty() {
        for body in ["false", "0", "0.0", r#""""#] {
            let students = client().parse_list_students(ok(body)).unwrap();
            assert!(students.is_empty(), "body {body:?}");
        }
    }

    #[test]
    fn parse_truthy_scalars_are_rejected() {
        for body in ["true", "1", r#""students""#] {
            let err = client().parse_list_students(ok(body)).unwrap_err();
            assert!(matches!(err, ApiError::DeserializationError(_)), "body {body:?}");
        }
    }

    #[test]
    fn parse_blank_body_is_empty() {
        assert!(client().parse_list_students(ok("")).unwrap().is_empty());
        assert!(client().parse_list_students(ok("  \n")).unwrap().is_empty());
    }

    #[test]
    fn parse_accepts_any_2xx() {
        let response = HttpResponse {
            status: 203,
            headers: Vec::new(),
            body: "[]".to_string(),
        };
        assert!(client().parse_list_students(response).unwrap().is_empty());
    }

    #[test]
    fn parse_server_error() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_list_students(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_object_body_is_rejected() {
        let err = client()
            .parse_list_students(ok(r#"{"students":[]}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_list_students(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
