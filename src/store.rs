use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{CalendarEvent, ChatMessage, ChatThread, Note, Project, Task};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read snapshot file: {0}")]
    ReadError(String),
    #[error("Failed to write snapshot file: {0}")]
    WriteError(String),
    #[error("Failed to parse snapshot JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Failed to create snapshot directory: {0}")]
    DirectoryError(String),
}

/// The full set of entity collections the dashboard projects over.
/// Provenance does not matter to the projection engine; this is just the
/// JSON shape the binary reads and writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub threads: Vec<ChatThread>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot. A missing file is an empty snapshot, the same
    /// way the app starts with an empty data set on first run.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        if !self.path.exists() {
            return Ok(Snapshot::default());
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::ReadError(e.to_string()))?;
        let snapshot = serde_json::from_str(&contents)?;
        Ok(snapshot)
    }

    /// Save the snapshot, creating parent directories if needed
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::DirectoryError(e.to_string()))?;
            }
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::WriteError(e.to_string()))?;
        Ok(())
    }

    /// Append a task and persist
    pub fn insert_task(&self, task: Task) -> Result<(), StoreError> {
        let mut snapshot = self.load()?;
        snapshot.tasks.push(task);
        self.save(&snapshot)
    }

    /// Append an event and persist
    pub fn insert_event(&self, event: CalendarEvent) -> Result<(), StoreError> {
        let mut snapshot = self.load()?;
        snapshot.events.push(event);
        self.save(&snapshot)
    }
}
