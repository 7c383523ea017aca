use crate::error::AppResult;
use shared::Todo;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// The whole todo collection as one JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty collection.
    pub fn load(&self) -> AppResult<Vec<Todo>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Writes a sibling temp file and renames it over the target.
    pub fn save(&self, todos: &[Todo]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(todos)?;
        let tmp = self.temp_path();
        let written = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), count = todos.len(), "saved todos");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "todos.json".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("nope/todos.json"));
        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_creates_parent_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("data/todos.json"));
        let todos = vec![Todo::new("one").with_id(1), Todo::new("two").with_id(2)];

        store.save(&todos).unwrap();

        assert_eq!(store.load().unwrap(), todos);
        let entries: Vec<_> = fs::read_dir(dir.path().join("data")).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn saved_file_is_a_plain_array() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("todos.json"));
        store.save(&[Todo::new("Todo").with_id(1)]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let items = raw.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["description"], serde_json::Value::Null);
        assert_eq!(items[0]["dueDate"], serde_json::Value::Null);
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("todos.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupied"), "x").unwrap();

        let err = JsonStore::new(target.clone())
            .save(&[Todo::new("one").with_id(1)])
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("todos.json")]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonStore::new(path).load().unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
    }
}
