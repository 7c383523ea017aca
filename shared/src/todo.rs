use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Format of due dates both on disk and in form input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single task record, stored as one element of the JSON data file.
///
/// `id == 0` means "not yet assigned"; the service replaces it on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: None,
            due_date: None,
            is_completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(self, id: u64) -> Self {
        Self { id, ..self }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn with_due_date(self, due_date: NaiveDate) -> Self {
        Self {
            due_date: Some(due_date),
            ..self
        }
    }

    pub fn with_created_at(self, created_at: DateTime<Utc>) -> Self {
        Self { created_at, ..self }
    }

    /// Key used when sorting by title: trimmed and case-folded.
    pub fn title_key(&self) -> String {
        self.title.trim().to_lowercase()
    }
}
