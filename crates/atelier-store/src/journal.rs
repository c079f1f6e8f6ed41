//! Append-only JSONL journal store.
//!
//! Each project gets `{data_dir}/{project_id}.jsonl`. Every write appends one
//! [`JournalRecord`]; loading replays the file in order, so the last record
//! for a task id wins and a removal acts as a tombstone.

use std::path::{Path, PathBuf};

use atelier_config::StoreConfig;
use atelier_core::entities::{ProjectBounds, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{ProjectState, TaskStore};

/// Journal schema version written by this build.
pub const JOURNAL_VERSION: u32 = 1;

const fn default_journal_version() -> u32 {
    1
}

/// One line of a project journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Schema version. Records written before versioning default to 1.
    #[serde(default = "default_journal_version")]
    pub v: u32,

    pub ts: DateTime<Utc>,

    #[serde(flatten)]
    pub entry: JournalEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum JournalEntry {
    SaveTask { task: Task },
    RemoveTask { task_id: String },
    SetBounds { bounds: ProjectBounds },
}

impl JournalRecord {
    #[must_use]
    pub fn now(entry: JournalEntry) -> Self {
        Self {
            v: JOURNAL_VERSION,
            ts: Utc::now(),
            entry,
        }
    }
}

/// [`TaskStore`] backed by per-project JSONL journals.
#[derive(Debug, Clone)]
pub struct JsonlTaskStore {
    data_dir: PathBuf,
}

impl JsonlTaskStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir).map_err(|source| StoreError::Io {
            path: data_dir.clone(),
            source,
        })?;
        Ok(Self { data_dir })
    }

    /// # Errors
    ///
    /// See [`JsonlTaskStore::new`].
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::new(&config.data_dir)
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Journal file of a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidProjectId`] for ids that are empty or
    /// would escape the data directory.
    pub fn journal_path(&self, project_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !project_id.is_empty()
            && !project_id.starts_with('.')
            && !project_id.contains(['/', '\\']);
        if !valid {
            return Err(StoreError::InvalidProjectId(project_id.to_string()));
        }
        Ok(self.data_dir.join(format!("{project_id}.jsonl")))
    }

    fn append(&self, project_id: &str, entry: JournalEntry) -> Result<(), StoreError> {
        let path = self.journal_path(project_id)?;
        let record = JournalRecord::now(entry);
        serde_jsonlines::append_json_lines(&path, [&record])
            .map_err(|source| StoreError::Io { path, source })
    }

    fn raw_lines(&self, project_id: &str) -> Result<(PathBuf, Vec<serde_json::Value>), StoreError> {
        let path = self.journal_path(project_id)?;
        if !path.exists() {
            return Ok((path, Vec::new()));
        }
        let lines = serde_jsonlines::json_lines::<serde_json::Value, _>(&path)
            .and_then(|lines| lines.collect::<Result<Vec<_>, _>>());
        match lines {
            Ok(lines) => Ok((path, lines)),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Every supported record of a project's journal, in file order.
    ///
    /// The version is read before the entry is decoded, so records from a
    /// newer schema are skipped even when their `op` is unknown to this build.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file cannot be read or a line is not JSON.
    /// - [`StoreError::Decode`] if a current-version line is not a valid record.
    pub fn records(&self, project_id: &str) -> Result<Vec<JournalRecord>, StoreError> {
        let (path, lines) = self.raw_lines(project_id)?;
        let mut records = Vec::with_capacity(lines.len());
        for (idx, value) in lines.into_iter().enumerate() {
            let line = idx + 1;
            let version = value
                .get("v")
                .map_or(Some(u64::from(JOURNAL_VERSION)), serde_json::Value::as_u64);
            if let Some(version) = version.filter(|&v| v != u64::from(JOURNAL_VERSION)) {
                tracing::warn!(
                    project_id,
                    line,
                    version,
                    "skipping journal record with unsupported version"
                );
                continue;
            }
            let record = serde_json::from_value(value).map_err(|source| StoreError::Decode {
                path: path.clone(),
                line,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn replay(&self, project_id: &str) -> Result<ProjectState, StoreError> {
        let mut state = ProjectState::default();
        for record in self.records(project_id)? {
            match record.entry {
                JournalEntry::SaveTask { task } => state.upsert(task),
                JournalEntry::RemoveTask { task_id } => state.remove(&task_id),
                JournalEntry::SetBounds { bounds } => state.bounds = bounds,
            }
        }
        Ok(state)
    }

    /// Rewrite a project's journal as one record per live task plus its bounds.
    ///
    /// Returns the number of lines dropped, including unsupported-version records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the journal cannot be read or rewritten.
    pub fn compact(&self, project_id: &str) -> Result<usize, StoreError> {
        let (path, lines) = self.raw_lines(project_id)?;
        let before = lines.len();
        let state = self.replay(project_id)?;

        let mut records: Vec<JournalRecord> = state
            .tasks
            .into_iter()
            .map(|task| JournalRecord::now(JournalEntry::SaveTask { task }))
            .collect();
        if state.bounds != ProjectBounds::default() {
            records.push(JournalRecord::now(JournalEntry::SetBounds {
                bounds: state.bounds,
            }));
        }

        let tmp = path.with_extension("jsonl.tmp");
        serde_jsonlines::write_json_lines(&tmp, &records).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        let dropped = before.saturating_sub(records.len());
        tracing::info!(project_id, dropped, kept = records.len(), "journal compacted");
        Ok(dropped)
    }
}

impl TaskStore for JsonlTaskStore {
    fn load_project_tasks(&self, project_id: &str) -> Result<Vec<Task>, StoreError> {
        Ok(self.replay(project_id)?.tasks)
    }

    fn save_task(&self, project_id: &str, task: &Task) -> Result<(), StoreError> {
        self.append(project_id, JournalEntry::SaveTask { task: task.clone() })
    }

    fn remove_task(&self, project_id: &str, task_id: &str) -> Result<(), StoreError> {
        self.append(
            project_id,
            JournalEntry::RemoveTask {
                task_id: task_id.to_string(),
            },
        )
    }

    fn project_bounds(&self, project_id: &str) -> Result<ProjectBounds, StoreError> {
        Ok(self.replay(project_id)?.bounds)
    }

    fn save_project_bounds(&self, project_id: &str, bounds: ProjectBounds) -> Result<(), StoreError> {
        self.append(project_id, JournalEntry::SetBounds { bounds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_shape_is_flat() {
        let record = JournalRecord {
            v: 1,
            ts: DateTime::parse_from_rfc3339("2026-03-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            entry: JournalEntry::RemoveTask {
                task_id: "tsk-1".into(),
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "v": 1,
                "ts": "2026-03-01T10:00:00Z",
                "op": "remove_task",
                "taskId": "tsk-1"
            })
        );
    }

    #[test]
    fn missing_version_defaults_to_one() {
        let line = r#"{"ts":"2026-03-01T10:00:00Z","op":"remove_task","taskId":"tsk-1"}"#;
        let record: JournalRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.v, 1);
    }

    #[test]
    fn future_record_with_unknown_op_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonlTaskStore::new(dir.path()).unwrap();
        store.remove_task("prj-1", "tsk-1").unwrap();
        let path = store.journal_path("prj-1").unwrap();
        let future = serde_json::json!({
            "v": 2,
            "ts": "2026-03-01T10:00:00Z",
            "op": "archive_task",
            "taskId": "tsk-1",
            "reason": "merged"
        });
        serde_jsonlines::append_json_lines(&path, [&future]).unwrap();

        let records = store.records("prj-1").unwrap();
        assert_eq!(records.len(), 1);
        assert!(matches!(records[0].entry, JournalEntry::RemoveTask { .. }));
        assert!(store.load_project_tasks("prj-1").unwrap().is_empty());
    }

    #[test]
    fn current_record_with_unknown_op_is_a_decode_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonlTaskStore::new(dir.path()).unwrap();
        let path = store.journal_path("prj-1").unwrap();
        let line = serde_json::json!({ "v": 1, "ts": "2026-03-01T10:00:00Z", "op": "archive_task" });
        serde_jsonlines::append_json_lines(&path, [&line]).unwrap();

        assert!(matches!(
            store.records("prj-1"),
            Err(StoreError::Decode { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_path_like_project_ids() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonlTaskStore::new(dir.path()).unwrap();
        for id in ["", "../etc", "a/b", "a\\b", ".hidden"] {
            assert!(matches!(
                store.journal_path(id),
                Err(StoreError::InvalidProjectId(_))
            ));
        }
        assert!(store.journal_path("prj-42").is_ok());
    }
}
