use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::HasId;
use crate::utils;

/// Calendar view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    Week,
}

/// A computed date window. `start`/`end` bound the logical range (the
/// month, or the week); `days` is the full run of rendered day slots,
/// padded to whole Sunday-through-Saturday weeks.
#[derive(Debug, Clone)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<NaiveDate>,
}

/// Number of day slots in a month grid: 6 full weeks, always.
pub const MONTH_GRID_SLOTS: usize = 42;

/// Sunday on or before the given date
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first + Months::new(1) - Days::new(1)
}

/// Compute the visible date window around an anchor date.
///
/// Month mode: `start`/`end` are the first and last day of the anchor's
/// month, and `days` is exactly 42 slots starting from the Sunday on or
/// before the 1st — the grid shape never changes with month length.
/// Week mode: the 7 days from the Sunday on or before the anchor.
pub fn compute_window(anchor: NaiveDate, mode: ViewMode) -> DateWindow {
    match mode {
        ViewMode::Month => {
            let start = first_of_month(anchor);
            let end = last_of_month(anchor);
            let grid_start = week_start(start);
            let days = (0..MONTH_GRID_SLOTS as u64)
                .map(|i| grid_start + Days::new(i))
                .collect();
            DateWindow { start, end, days }
        }
        ViewMode::Week => {
            let start = week_start(anchor);
            let end = start + Days::new(6);
            let days = (0..7).map(|i| start + Days::new(i)).collect();
            DateWindow { start, end, days }
        }
    }
}

/// Shift the anchor back by one calendar month or one week.
/// Pure function of (anchor, mode); "today" is the caller passing its own now.
pub fn previous_anchor(anchor: NaiveDate, mode: ViewMode) -> NaiveDate {
    match mode {
        ViewMode::Month => anchor - Months::new(1),
        ViewMode::Week => anchor - Days::new(7),
    }
}

/// Shift the anchor forward by one calendar month or one week.
pub fn next_anchor(anchor: NaiveDate, mode: ViewMode) -> NaiveDate {
    match mode {
        ViewMode::Month => anchor + Months::new(1),
        ViewMode::Week => anchor + Days::new(7),
    }
}

/// One rendered day slot. `items` is the kept subset (time-sorted
/// ascending, capped if a cap was requested); `overflow` counts the items
/// cut by the cap.
#[derive(Debug, Clone)]
pub struct DaySlot<T> {
    pub day: NaiveDate,
    pub items: Vec<T>,
    pub overflow: usize,
}

/// Result of assigning items to day slots. Slots align one-to-one with
/// the input `days`; `skipped` holds ids of records whose start instant
/// failed to parse.
#[derive(Debug, Clone)]
pub struct SlotAssignment<T> {
    pub slots: Vec<DaySlot<T>>,
    pub skipped: Vec<String>,
}

/// Assign items to the day slot matching their start instant's calendar
/// day. Items starting outside the window are silently excluded. Slot
/// items are sorted ascending by start time (ties keep input order); with
/// `cap = Some(n)` only the n earliest stay and `overflow` reports the cut.
pub fn assign_to_slots<T, F>(
    items: &[T],
    days: &[NaiveDate],
    start_of: F,
    cap: Option<usize>,
) -> SlotAssignment<T>
where
    T: HasId + Clone,
    F: Fn(&T) -> Option<&str>,
{
    let mut skipped = Vec::new();
    let mut buckets: Vec<Vec<(chrono::NaiveDateTime, T)>> = vec![Vec::new(); days.len()];

    for item in items {
        let Some(raw) = start_of(item) else {
            continue;
        };
        let ts = match utils::parse_instant(raw) {
            Ok(ts) => ts,
            Err(_) => {
                skipped.push(item.id().to_string());
                continue;
            }
        };
        // Outside the window is a valid case, not an error
        if let Some(slot) = days.iter().position(|d| *d == ts.date()) {
            buckets[slot].push((ts, item.clone()));
        }
    }

    let slots = days
        .iter()
        .zip(buckets)
        .map(|(day, mut bucket)| {
            bucket.sort_by_key(|(ts, _)| *ts);
            let overflow = match cap {
                Some(n) => bucket.len().saturating_sub(n),
                None => 0,
            };
            if let Some(n) = cap {
                bucket.truncate(n);
            }
            DaySlot {
                day: *day,
                items: bucket.into_iter().map(|(_, item)| item).collect(),
                overflow,
            }
        })
        .collect();

    SlotAssignment { slots, skipped }
}
