pub mod calendar;
pub mod cli;
pub mod config;
pub mod filter;
pub mod grouping;
pub mod mentions;
pub mod models;
pub mod store;
pub mod utils;

pub use calendar::{compute_window, ViewMode};
pub use config::Config;
pub use filter::{apply_filter, FilterSpec};
pub use grouping::{group_by_date, sort_with_priority};
pub use models::{CalendarEvent, ChatMessage, Note, Project, Task};
pub use store::{Snapshot, Store};
pub use utils::Profile;
