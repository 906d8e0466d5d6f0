use serde::{Deserialize, Serialize};

use crate::models::{CalendarEvent, ChatMessage, Note, Task};

/// A record that can answer field lookups for filtering.
///
/// `field_values` returns the string values carried under a field name;
/// list fields (tags, attendees) yield one entry per element. `flag`
/// returns a boolean field, or None when the record has no such flag.
pub trait Filterable {
    fn field_values(&self, field: &str) -> Vec<String>;

    fn flag(&self, _field: &str) -> Option<bool> {
        None
    }
}

/// Restrict a field to a set of allowed values.
/// An empty `allowed` list means "no restriction" — deselecting every
/// filter chip shows everything, it does not hide everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipClause {
    pub field: String,
    pub allowed: Vec<String>,
}

/// Require a boolean field to hold a specific value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagClause {
    pub field: String,
    pub value: bool,
}

/// Case-insensitive substring search across a set of fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextClause {
    pub fields: Vec<String>,
    pub query: String,
}

/// A filter specification. All present clauses are ANDed together;
/// an empty spec matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub membership: Vec<MembershipClause>,
    #[serde(default)]
    pub flags: Vec<FlagClause>,
    #[serde(default)]
    pub text: Option<TextClause>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_membership(mut self, field: &str, allowed: Vec<String>) -> Self {
        self.membership.push(MembershipClause {
            field: field.to_string(),
            allowed,
        });
        self
    }

    pub fn with_flag(mut self, field: &str, value: bool) -> Self {
        self.flags.push(FlagClause {
            field: field.to_string(),
            value,
        });
        self
    }

    pub fn with_text(mut self, fields: &[&str], query: &str) -> Self {
        self.text = Some(TextClause {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            query: query.to_string(),
        });
        self
    }

    /// True when the spec has no effective restriction at all
    pub fn is_empty(&self) -> bool {
        self.membership.iter().all(|c| c.allowed.is_empty())
            && self.flags.is_empty()
            && self
                .text
                .as_ref()
                .map(|t| t.query.is_empty())
                .unwrap_or(true)
    }

    fn matches<T: Filterable>(&self, item: &T) -> bool {
        // Membership clauses: any of the item's values for the field must
        // be in the allowed set. Empty allowed set = no restriction.
        for clause in &self.membership {
            if clause.allowed.is_empty() {
                continue;
            }
            let values = item.field_values(&clause.field);
            if !values.iter().any(|v| clause.allowed.contains(v)) {
                return false;
            }
        }

        // Flag clauses: a record without the flag cannot satisfy it
        for clause in &self.flags {
            match item.flag(&clause.field) {
                Some(value) if value == clause.value => {}
                _ => return false,
            }
        }

        // Text clause: case-insensitive substring over every value of the
        // listed fields. An empty query or empty field list is no restriction.
        if let Some(ref text) = self.text {
            if !text.query.is_empty() && !text.fields.is_empty() {
                let needle = text.query.to_lowercase();
                let hit = text.fields.iter().any(|field| {
                    item.field_values(field)
                        .iter()
                        .any(|v| v.to_lowercase().contains(&needle))
                });
                if !hit {
                    return false;
                }
            }
        }

        true
    }
}

/// Apply a filter spec to a collection, preserving input order.
/// Filtering is stable and idempotent.
pub fn apply_filter<T: Filterable>(items: Vec<T>, spec: &FilterSpec) -> Vec<T> {
    let mut items = items;
    items.retain(|item| spec.matches(item));
    items
}

impl Filterable for Task {
    fn field_values(&self, field: &str) -> Vec<String> {
        match field {
            "id" => vec![self.id.clone()],
            "project" => vec![self.project_id.clone()],
            "status" => vec![self.status.as_str().to_string()],
            "priority" => vec![self.priority.as_str().to_string()],
            "assignee" => self.assignee_id.clone().into_iter().collect(),
            "title" => vec![self.title.clone()],
            "description" => self.description.clone().into_iter().collect(),
            "tags" => self.tags.clone(),
            _ => Vec::new(),
        }
    }
}

impl Filterable for CalendarEvent {
    fn field_values(&self, field: &str) -> Vec<String> {
        match field {
            "id" => vec![self.id.clone()],
            "project" => self.project_id.clone().into_iter().collect(),
            "type" => vec![self.event_type.as_str().to_string()],
            "title" => vec![self.title.clone()],
            "attendees" => self.attendees.clone(),
            _ => Vec::new(),
        }
    }
}

impl Filterable for ChatMessage {
    fn field_values(&self, field: &str) -> Vec<String> {
        match field {
            "id" => vec![self.id.clone()],
            "thread" => vec![self.thread_id.clone()],
            "author" => vec![self.author_id.clone()],
            "content" => vec![self.content.clone()],
            "mentions" => self.mentions.clone(),
            _ => Vec::new(),
        }
    }
}

impl Filterable for Note {
    fn field_values(&self, field: &str) -> Vec<String> {
        match field {
            "id" => vec![self.id.clone()],
            "author" => vec![self.author_id.clone()],
            "title" => vec![self.title.clone()],
            "content" => vec![self.content.clone()],
            "tags" => self.tags.clone(),
            _ => Vec::new(),
        }
    }

    fn flag(&self, field: &str) -> Option<bool> {
        match field {
            "pinned" => Some(self.is_pinned),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskStatus};

    fn task(id: &str, status: TaskStatus, priority: Priority, tags: &[&str]) -> Task {
        let mut t = Task::new("proj-1".to_string(), format!("Task {id}"));
        t.id = id.to_string();
        t.status = status;
        t.priority = priority;
        t.tags = tags.iter().map(|s| s.to_string()).collect();
        t
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task("a", TaskStatus::Todo, Priority::High, &["backend", "api"]),
            task("b", TaskStatus::Done, Priority::Low, &["frontend"]),
            task("c", TaskStatus::Todo, Priority::Urgent, &["Design"]),
            task("d", TaskStatus::Review, Priority::High, &[]),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn empty_spec_matches_everything() {
        let out = apply_filter(sample_tasks(), &FilterSpec::new());
        assert_eq!(ids(&out), ["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_allowed_list_is_no_restriction() {
        // Deselecting every chip must show everything, not nothing
        let spec = FilterSpec::new().with_membership("project", Vec::new());
        let out = apply_filter(sample_tasks(), &spec);
        assert_eq!(ids(&out), ["a", "b", "c", "d"]);
    }

    #[test]
    fn membership_narrows_by_field() {
        let spec = FilterSpec::new().with_membership("status", vec!["todo".to_string()]);
        let out = apply_filter(sample_tasks(), &spec);
        assert_eq!(ids(&out), ["a", "c"]);
    }

    #[test]
    fn clauses_are_anded() {
        let spec = FilterSpec::new()
            .with_membership("status", vec!["todo".to_string()])
            .with_membership("priority", vec!["urgent".to_string()]);
        let out = apply_filter(sample_tasks(), &spec);
        assert_eq!(ids(&out), ["c"]);
    }

    #[test]
    fn text_search_is_case_insensitive_and_covers_list_fields() {
        let spec = FilterSpec::new().with_text(&["title", "tags"], "design");
        let out = apply_filter(sample_tasks(), &spec);
        assert_eq!(ids(&out), ["c"]);
    }

    #[test]
    fn text_search_with_empty_query_is_no_restriction() {
        let spec = FilterSpec::new().with_text(&["title"], "");
        let out = apply_filter(sample_tasks(), &spec);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn filter_preserves_input_order() {
        let spec = FilterSpec::new().with_membership("priority", vec!["high".to_string()]);
        let out = apply_filter(sample_tasks(), &spec);
        assert_eq!(ids(&out), ["a", "d"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let spec = FilterSpec::new()
            .with_membership("status", vec!["todo".to_string(), "review".to_string()])
            .with_text(&["title", "tags"], "task");
        let once = apply_filter(sample_tasks(), &spec);
        let twice = apply_filter(once.clone(), &spec);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn flag_clause_on_notes() {
        let pinned = Note {
            id: "n1".to_string(),
            author_id: "u1".to_string(),
            title: "Pinned".to_string(),
            content: String::new(),
            tags: Vec::new(),
            is_pinned: true,
            updated_at: "2024-03-01 09:00:00".to_string(),
        };
        let mut loose = pinned.clone();
        loose.id = "n2".to_string();
        loose.is_pinned = false;

        let spec = FilterSpec::new().with_flag("pinned", true);
        let out = apply_filter(vec![pinned, loose], &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "n1");
    }

    #[test]
    fn is_empty_reflects_effective_restrictions() {
        assert!(FilterSpec::new().is_empty());
        // Chips all deselected and a blank search box still count as empty
        assert!(FilterSpec::new()
            .with_membership("status", Vec::new())
            .with_text(&["title"], "")
            .is_empty());
        assert!(!FilterSpec::new()
            .with_membership("status", vec!["todo".to_string()])
            .is_empty());
        assert!(!FilterSpec::new().with_flag("pinned", true).is_empty());
        assert!(!FilterSpec::new().with_text(&["title"], "report").is_empty());
    }

    #[test]
    fn flag_clause_fails_records_without_the_flag() {
        // Tasks carry no "pinned" flag, so the clause excludes them all
        let spec = FilterSpec::new().with_flag("pinned", true);
        let out = apply_filter(sample_tasks(), &spec);
        assert!(out.is_empty());
    }
}
