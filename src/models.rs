use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils;

/// Task workflow status, matching the board's column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// All statuses in canonical board-column order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Done => "Done",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Meeting,
    Deadline,
    Milestone,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Meeting => "meeting",
            EventType::Deadline => "deadline",
            EventType::Milestone => "milestone",
        }
    }
}

/// Common identity for all records, used by projections to report
/// which records they skipped.
pub trait HasId {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<String>,
    pub due_date: Option<String>, // instant string, e.g. "2024-03-13 17:00:00"
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    pub fn new(project_id: String, title: String) -> Self {
        let now = utils::now_string();
        Self {
            id: next_id("task"),
            project_id,
            title,
            description: None,
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            assignee_id: None,
            due_date: None,
            tags: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl HasId for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: String, // instant string
    pub end: String,   // instant string
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub project_id: Option<String>,
    pub color: String,
    #[serde(default)]
    pub attendees: Vec<String>,
}

#[derive(Debug, Error)]
pub enum EventValidationError {
    #[error("Failed to parse event start '{0}'")]
    BadStart(String),
    #[error("Failed to parse event end '{0}'")]
    BadEnd(String),
    #[error("Event end must be after start ({start} >= {end})")]
    EndNotAfterStart { start: String, end: String },
}

impl CalendarEvent {
    pub fn new(title: String, start: String, end: String, event_type: EventType) -> Self {
        Self {
            id: next_id("event"),
            title,
            start,
            end,
            event_type,
            project_id: None,
            color: "blue".to_string(),
            attendees: Vec::new(),
        }
    }

    /// Validate an event on the creation path: both instants must parse
    /// and end must be strictly after start. Read paths never call this;
    /// they normalize a bad range to zero duration instead.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        let start = utils::parse_instant(&self.start)
            .map_err(|_| EventValidationError::BadStart(self.start.clone()))?;
        let end = utils::parse_instant(&self.end)
            .map_err(|_| EventValidationError::BadEnd(self.end.clone()))?;
        if end <= start {
            return Err(EventValidationError::EndNotAfterStart {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        Ok(())
    }

    /// Duration in minutes, normalized to zero when the range is invalid
    /// or either instant is unparseable.
    pub fn duration_minutes(&self) -> i64 {
        match (
            utils::parse_instant(&self.start),
            utils::parse_instant(&self.end),
        ) {
            (Ok(start), Ok(end)) if end > start => (end - start).num_minutes(),
            _ => 0,
        }
    }
}

impl HasId for CalendarEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub participant_ids: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub thread_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub mentions: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl HasId for ChatMessage {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
    pub updated_at: String,
}

impl HasId for Note {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: String,
}

impl HasId for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub size_bytes: u64,
}

/// Generate a unique id with a readable prefix (e.g. "task-a3f9...").
/// Ids only need to be unique within one snapshot; a timestamp plus a
/// process-local counter is enough without pulling in a uuid dependency.
fn next_id(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    format!("{}-{}-{}", prefix, stamp, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: TaskStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(back, TaskStatus::InProgress);
    }

    #[test]
    fn event_type_rides_under_type_key() {
        let event = CalendarEvent::new(
            "Standup".to_string(),
            "2024-03-13 09:00:00".to_string(),
            "2024-03-13 09:15:00".to_string(),
            EventType::Meeting,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "meeting");
    }

    #[test]
    fn validate_rejects_end_before_start() {
        let event = CalendarEvent::new(
            "Backwards".to_string(),
            "2024-03-13 10:00:00".to_string(),
            "2024-03-13 09:00:00".to_string(),
            EventType::Meeting,
        );
        assert!(matches!(
            event.validate(),
            Err(EventValidationError::EndNotAfterStart { .. })
        ));
    }

    #[test]
    fn validate_rejects_equal_start_and_end() {
        let event = CalendarEvent::new(
            "Instant".to_string(),
            "2024-03-13 10:00:00".to_string(),
            "2024-03-13 10:00:00".to_string(),
            EventType::Deadline,
        );
        assert!(event.validate().is_err());
    }

    #[test]
    fn duration_normalizes_invalid_range_to_zero() {
        let event = CalendarEvent::new(
            "Backwards".to_string(),
            "2024-03-13 10:00:00".to_string(),
            "2024-03-13 09:00:00".to_string(),
            EventType::Meeting,
        );
        assert_eq!(event.duration_minutes(), 0);
    }

    #[test]
    fn duration_of_valid_event() {
        let event = CalendarEvent::new(
            "Planning".to_string(),
            "2024-03-13 09:00:00".to_string(),
            "2024-03-13 10:30:00".to_string(),
            EventType::Meeting,
        );
        assert_eq!(event.duration_minutes(), 90);
    }

    #[test]
    fn next_id_is_unique() {
        let a = next_id("task");
        let b = next_id("task");
        assert_ne!(a, b);
    }

    #[test]
    fn task_deserializes_with_missing_lists() {
        let json = r#"{
            "id": "task-1",
            "project_id": "proj-1",
            "title": "Write the report",
            "description": null,
            "status": "review",
            "priority": "high",
            "assignee_id": "user-1",
            "due_date": "2024-03-15 17:00:00",
            "created_at": "2024-03-01 09:00:00",
            "updated_at": "2024-03-10 12:00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Review);
        assert!(task.tags.is_empty());
        assert!(task.comments.is_empty());
    }
}
