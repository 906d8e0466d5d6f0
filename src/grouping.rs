use crate::models::HasId;
use crate::utils;

/// One bucket of a date grouping. `key` is the stable YYYY-MM-DD day key;
/// items inside are sorted ascending by their full timestamp.
#[derive(Debug, Clone)]
pub struct DateGroup<T> {
    pub key: String,
    pub items: Vec<T>,
}

/// Result of grouping a collection by calendar day.
/// `skipped` holds the ids of records whose date value was present but
/// unparseable; one bad record never aborts the rest.
#[derive(Debug, Clone)]
pub struct Grouped<T> {
    pub groups: Vec<DateGroup<T>>,
    pub skipped: Vec<String>,
}

impl<T> Grouped<T> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group items into calendar-day buckets.
///
/// `date_of` selects the instant string to group on (due date, start,
/// created-at). Items with no date value are silently excluded — an
/// undated task is valid, just not groupable. Groups come back in
/// ascending chronological order; within a group, items are sorted
/// ascending by full timestamp with ties keeping input order.
pub fn group_by_date<T, F>(items: &[T], date_of: F) -> Grouped<T>
where
    T: HasId + Clone,
    F: Fn(&T) -> Option<&str>,
{
    let mut skipped = Vec::new();
    let mut dated: Vec<(chrono::NaiveDateTime, T)> = Vec::new();

    for item in items {
        let Some(raw) = date_of(item) else {
            continue;
        };
        match utils::parse_instant(raw) {
            Ok(ts) => dated.push((ts, item.clone())),
            Err(_) => skipped.push(item.id().to_string()),
        }
    }

    // Stable sort by full timestamp keeps input order for ties and
    // yields groups chronologically in one pass.
    dated.sort_by_key(|(ts, _)| *ts);

    let mut groups: Vec<DateGroup<T>> = Vec::new();
    for (ts, item) in dated {
        let key = utils::day_key(ts.date());
        match groups.last_mut() {
            Some(group) if group.key == key => group.items.push(item),
            _ => groups.push(DateGroup {
                key,
                items: vec![item],
            }),
        }
    }

    Grouped { groups, skipped }
}

/// Stable partition + sort: items satisfying `is_priority` come first,
/// then within each partition items are ordered by `tiebreak` descending.
/// Equal-rank items keep their relative input order.
pub fn sort_with_priority<T, P, K, O>(mut items: Vec<T>, is_priority: P, tiebreak: K) -> Vec<T>
where
    P: Fn(&T) -> bool,
    K: Fn(&T) -> O,
    O: Ord,
{
    items.sort_by(|a, b| {
        is_priority(b)
            .cmp(&is_priority(a))
            .then_with(|| tiebreak(b).cmp(&tiebreak(a)))
    });
    items
}
