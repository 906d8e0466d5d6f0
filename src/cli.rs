use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::calendar::{self, ViewMode};
use crate::config::Config;
use crate::filter::{apply_filter, FilterSpec};
use crate::grouping::{group_by_date, sort_with_priority};
use crate::mentions::{extract_mentions, extract_urls};
use crate::models::{CalendarEvent, EventType, EventValidationError, Priority, Task, TaskStatus};
use crate::store::{Store, StoreError};
use crate::utils::{current_date, parse_date};

#[derive(Parser)]
#[command(name = "pmdash")]
#[command(about = "Project dashboard views from plain JSON data")]
#[command(version)]
pub struct Cli {
    /// Snapshot file path (overrides the configured one)
    #[arg(short, long)]
    pub data: Option<String>,

    /// Use development mode (uses separate dev config/snapshot)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the task board, one column per status
    Board {
        /// Only tasks of this project
        #[arg(long)]
        project: Option<String>,
        /// Only tasks assigned to this user id
        #[arg(long)]
        assignee: Option<String>,
        /// Only tasks of these priorities (repeatable)
        #[arg(long)]
        priority: Vec<Priority>,
        /// Only tasks carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// Free-text search over title, description and tags
        #[arg(long)]
        search: Option<String>,
    },
    /// Show due-dated tasks grouped by day
    Agenda {
        /// Only tasks of this project
        #[arg(long)]
        project: Option<String>,
    },
    /// Show the calendar for a month or week
    Calendar {
        /// Month or week view (defaults to the configured view)
        #[arg(long, value_enum)]
        mode: Option<ViewMode>,
        /// Anchor date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        anchor: Option<String>,
        /// Max events shown per day before "+N more" (defaults to config)
        #[arg(long)]
        cap: Option<usize>,
    },
    /// Show notes, pinned first, most recently updated first
    Notes {
        /// Only notes carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// Free-text search over title and content
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a chat thread with mentions and links annotated
    Thread {
        /// Thread id
        id: String,
    },
    /// Quickly add a new task
    AddTask {
        /// Task title
        title: String,
        /// Project id
        #[arg(long)]
        project: String,
        /// Due date (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        due: Option<String>,
        /// Priority
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Quickly add a new calendar event
    AddEvent {
        /// Event title
        title: String,
        /// Start instant ("YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        start: String,
        /// End instant; must be after start
        #[arg(long)]
        end: String,
        /// Event type
        #[arg(long, value_enum, default_value = "meeting")]
        kind: EventType,
        /// Project id
        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Snapshot error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(#[from] EventValidationError),
    #[error("No such thread: {0}")]
    UnknownThread(String),
}

/// Handle the board command: filter tasks, then partition into the four
/// status columns in canonical order
pub fn handle_board(
    project: Option<String>,
    assignee: Option<String>,
    priority: Vec<Priority>,
    tag: Option<String>,
    search: Option<String>,
    store: &Store,
) -> Result<(), CliError> {
    let snapshot = store.load()?;

    let mut spec = FilterSpec::new()
        .with_membership("project", project.into_iter().collect())
        .with_membership("assignee", assignee.into_iter().collect())
        .with_membership(
            "priority",
            priority.iter().map(|p| p.as_str().to_string()).collect(),
        )
        .with_membership("tags", tag.into_iter().collect());
    if let Some(query) = search {
        spec = spec.with_text(&["title", "description", "tags"], &query);
    }

    let tasks = apply_filter(snapshot.tasks, &spec);

    for status in TaskStatus::ALL {
        let column: Vec<&Task> = tasks.iter().filter(|t| t.status == status).collect();
        println!("{} ({})", status.label(), column.len());
        for task in column {
            let due = task.due_date.as_deref().unwrap_or("-");
            println!("  [{}] {} (due {})", task.priority.as_str(), task.title, due);
        }
        println!();
    }

    Ok(())
}

/// Handle the agenda command: group due-dated tasks by calendar day
pub fn handle_agenda(project: Option<String>, store: &Store) -> Result<(), CliError> {
    let snapshot = store.load()?;

    let spec = FilterSpec::new().with_membership("project", project.into_iter().collect());
    let tasks = apply_filter(snapshot.tasks, &spec);

    let grouped = group_by_date(&tasks, |t| t.due_date.as_deref());
    if grouped.is_empty() {
        println!("No due-dated tasks.");
    }
    for group in &grouped.groups {
        println!("{}", group.key);
        for task in &group.items {
            println!("  [{}] {}", task.status.as_str(), task.title);
        }
    }

    // Bad records are diagnostics, never fatal
    for id in &grouped.skipped {
        eprintln!("warning: skipped task {} (unparseable due date)", id);
    }

    Ok(())
}

/// Handle the calendar command: compute the window and slot events into it
pub fn handle_calendar(
    mode: Option<ViewMode>,
    anchor: Option<String>,
    cap: Option<usize>,
    config: &Config,
    store: &Store,
) -> Result<(), CliError> {
    let snapshot = store.load()?;

    let mode = mode.unwrap_or(config.default_view);
    let anchor = match anchor {
        Some(raw) => parse_date(&raw)
            .map_err(|e| CliError::DateParseError(format!("Invalid anchor '{}': {}", raw, e)))?,
        None => current_date(),
    };
    let cap = cap.unwrap_or(config.day_cap);

    let window = calendar::compute_window(anchor, mode);
    let assigned =
        calendar::assign_to_slots(&snapshot.events, &window.days, |e| Some(&e.start), Some(cap));

    println!(
        "{} .. {} ({} days rendered)",
        window.start,
        window.end,
        window.days.len()
    );
    for slot in &assigned.slots {
        if slot.items.is_empty() && slot.overflow == 0 {
            continue;
        }
        println!("{}", slot.day);
        for event in &slot.items {
            println!(
                "  {} [{}] {} ({} min)",
                event.start,
                event.event_type.as_str(),
                event.title,
                event.duration_minutes()
            );
        }
        if slot.overflow > 0 {
            println!("  +{} more", slot.overflow);
        }
    }

    for id in &assigned.skipped {
        eprintln!("warning: skipped event {} (unparseable start)", id);
    }

    Ok(())
}

/// Handle the notes command: pinned first, most recently updated first
pub fn handle_notes(
    tag: Option<String>,
    search: Option<String>,
    store: &Store,
) -> Result<(), CliError> {
    let snapshot = store.load()?;

    let mut spec = FilterSpec::new().with_membership("tags", tag.into_iter().collect());
    if let Some(query) = search {
        spec = spec.with_text(&["title", "content", "tags"], &query);
    }
    let notes = apply_filter(snapshot.notes, &spec);

    let sorted = sort_with_priority(notes, |n| n.is_pinned, |n| n.updated_at.clone());
    for note in &sorted {
        let pin = if note.is_pinned { "*" } else { " " };
        println!("{} {} (updated {})", pin, note.title, note.updated_at);
    }

    Ok(())
}

/// Handle the thread command: messages in createdAt order with mentions
/// and links extracted at render time
pub fn handle_thread(id: String, store: &Store) -> Result<(), CliError> {
    let snapshot = store.load()?;

    let thread = snapshot
        .threads
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| CliError::UnknownThread(id.clone()))?;

    let spec = FilterSpec::new().with_membership("thread", vec![id]);
    let messages = apply_filter(snapshot.messages, &spec);

    // Total order by createdAt, insertion order breaking ties
    let grouped = group_by_date(&messages, |m| Some(m.created_at.as_str()));

    println!("# {}", thread.name);
    for group in &grouped.groups {
        println!("-- {} --", group.key);
        for message in &group.items {
            println!("{} {}: {}", message.created_at, message.author_id, message.content);
            let mentions = extract_mentions(&message.content);
            if !mentions.is_empty() {
                println!("    mentions: {}", mentions.join(", "));
            }
            let urls = extract_urls(&message.content);
            if !urls.is_empty() {
                println!("    links: {}", urls.join(", "));
            }
        }
    }

    for id in &grouped.skipped {
        eprintln!("warning: skipped message {} (unparseable timestamp)", id);
    }

    Ok(())
}

/// Handle the add-task command
pub fn handle_add_task(
    title: String,
    project: String,
    due: Option<String>,
    priority: Option<Priority>,
    tags: Option<String>,
    store: &Store,
) -> Result<(), CliError> {
    // Validate the due date up front if provided
    if let Some(ref due_str) = due {
        crate::utils::parse_instant(due_str).map_err(|e| {
            CliError::DateParseError(format!("Invalid due date '{}': {}", due_str, e))
        })?;
    }

    let mut task = Task::new(project, title);
    task.due_date = due;
    if let Some(priority) = priority {
        task.priority = priority;
    }
    if let Some(tags) = tags {
        task.tags = tags
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }

    let id = task.id.clone();
    store.insert_task(task)?;
    println!("Task created successfully (ID: {})", id);

    Ok(())
}

/// Handle the add-event command. This is the one place the end-after-start
/// rule is enforced; read paths normalize instead.
pub fn handle_add_event(
    title: String,
    start: String,
    end: String,
    kind: EventType,
    project: Option<String>,
    store: &Store,
) -> Result<(), CliError> {
    let mut event = CalendarEvent::new(title, start, end, kind);
    event.project_id = project;
    event.validate()?;

    let id = event.id.clone();
    store.insert_event(event)?;
    println!("Event created successfully (ID: {})", id);

    Ok(())
}
