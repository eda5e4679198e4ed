use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub matric_no: String,
    pub name: String,
    pub sesi: String,
    pub semester: u32,
}

impl Student {
    pub fn new(matric_no: &str, name: &str, sesi: &str, semester: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            matric_no: matric_no.to_string(),
            name: name.to_string(),
            sesi: sesi.to_string(),
            semester,
        }
    }
}

/// Query string accepted by `GET /students`. Every field is optional here so
/// that a missing credential maps to 401 rather than axum's 400.
#[derive(Debug, Deserialize)]
pub struct ListStudents {
    pub entity: Option<String>,
    pub session_id: Option<String>,
    pub sesi: Option<String>,
    pub semester: Option<u32>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

/// In-memory student directory.
///
/// Unknown entities answer with `null`. Entities marked failing answer 500.
#[derive(Debug, Default)]
pub struct Directory {
    students: HashMap<String, Vec<Student>>,
    sessions: HashSet<String>,
    failing: HashSet<String>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small directory used by the binary.
    pub fn demo() -> Self {
        let mut dir = Self::new();
        dir.add_session("demo-session");
        dir.add_students(
            "fsktm",
            vec![
                Student::new("A21EC0001", "Aina Sofea", "2024/2025", 1),
                Student::new("A21EC0002", "Badrul Hisham", "2024/2025", 1),
                Student::new("A21EC0003", "Chong Wei Ling", "2024/2025", 2),
                Student::new("A20EC0104", "Dharshini Rao", "2023/2024", 1),
            ],
        );
        dir
    }

    pub fn add_session(&mut self, session_id: &str) {
        self.sessions.insert(session_id.to_string());
    }

    pub fn add_students(&mut self, entity: &str, students: Vec<Student>) {
        self.students
            .entry(entity.to_string())
            .or_default()
            .extend(students);
    }

    pub fn fail_entity(&mut self, entity: &str) {
        self.failing.insert(entity.to_string());
    }
}

pub type Db = Arc<RwLock<Directory>>;

pub fn app(directory: Directory) -> Router {
    let db: Db = Arc::new(RwLock::new(directory));
    Router::new()
        .route("/students", get(list_students))
        .route("/health", get(health))
        .with_state(db)
}

pub async fn run(listener: TcpListener, directory: Directory) -> Result<(), std::io::Error> {
    axum::serve(listener, app(directory)).await
}

async fn health() -> &'static str {
    "ok"
}

async fn list_students(
    State(db): State<Db>,
    Query(query): Query<ListStudents>,
) -> Result<Json<Option<Vec<Student>>>, StatusCode> {
    let dir = db.read().await;

    let (Some(entity), Some(session_id)) = (query.entity.as_deref(), query.session_id.as_deref())
    else {
        tracing::warn!("rejecting request without entity or session_id");
        return Err(StatusCode::UNAUTHORIZED);
    };
    if !dir.sessions.contains(session_id) {
        tracing::warn!(entity, "rejecting unknown session");
        return Err(StatusCode::UNAUTHORIZED);
    }
    if dir.failing.contains(entity) {
        tracing::error!(entity, "entity backend unavailable");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let Some(students) = dir.students.get(entity) else {
        tracing::info!(entity, "unknown entity");
        return Ok(Json(None));
    };

    let page: Vec<Student> = students
        .iter()
        .filter(|s| query.sesi.as_deref().map_or(true, |sesi| s.sesi == sesi))
        .filter(|s| query.semester.map_or(true, |sem| s.semester == sem))
        .skip(query.offset)
        .take(query.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    tracing::info!(entity, count = page.len(), "listing students");
    Ok(Json(Some(page)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_serializes_to_json() {
        let student = Student {
            id: Uuid::nil(),
            matric_no: "A21EC0001".to_string(),
            name: "Aina Sofea".to_string(),
            sesi: "2024/2025".to_string(),
            semester: 1,
        };
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["matric_no"], "A21EC0001");
        assert_eq!(json["sesi"], "2024/2025");
        assert_eq!(json["semester"], 1);
    }

    #[test]
    fn list_query_offset_defaults_to_zero() {
        let query: ListStudents =
            serde_json::from_str(r#"{"entity":"fsktm","session_id":"s"}"#).unwrap();
        assert_eq!(query.offset, 0);
        assert!(query.limit.is_none());
        assert!(query.sesi.is_none());
    }

    #[test]
    fn add_students_appends_to_entity() {
        let mut dir = Directory::new();
        dir.add_students("fsktm", vec![Student::new("A1", "One", "2024/2025", 1)]);
        dir.add_students("fsktm", vec![Student::new("A2", "Two", "2024/2025", 1)]);
        assert_eq!(dir.students["fsktm"].len(), 2);
    }

    #[test]
    fn demo_directory_has_a_session() {
        let dir = Directory::demo();
        assert!(dir.sessions.contains("demo-session"));
        assert!(dir.students.contains_key("fsktm"));
    }
}
