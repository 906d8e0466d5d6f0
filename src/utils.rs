use directories::{ProjectDirs, BaseDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for pmdash
/// If profile is Dev, uses "pmdash-dev" instead of "pmdash"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "pmdash-dev",
        Profile::Prod => "pmdash",
    };
    ProjectDirs::from("com", "pmdash", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for pmdash
/// If profile is Dev, uses "pmdash-dev" instead of "pmdash"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "pmdash-dev",
        Profile::Prod => "pmdash",
    };
    ProjectDirs::from("com", "pmdash", app_name).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Parse an instant string into a naive local timestamp.
/// Accepts "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DDTHH:MM:SS", or a bare
/// "YYYY-MM-DD" (treated as midnight).
pub fn parse_instant(value: &str) -> Result<chrono::NaiveDateTime, chrono::ParseError> {
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

/// Stable calendar-day key for a date (YYYY-MM-DD).
/// Used as the grouping/map key; display labels are formatted by callers.
pub fn day_key(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Get the current timestamp as an instant string (UTC)
pub fn now_string() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Get the current local date
pub fn current_date() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn parses_full_instant() {
        let ts = parse_instant("2024-03-13 14:30:00").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());
        assert_eq!(ts.hour(), 14);
    }

    #[test]
    fn parses_t_separated_instant() {
        let ts = parse_instant("2024-03-13T09:00:00").unwrap();
        assert_eq!(ts.hour(), 9);
    }

    #[test]
    fn bare_date_parses_as_midnight() {
        let ts = parse_instant("2024-03-13").unwrap();
        assert_eq!(ts.hour(), 0);
        assert_eq!(ts.minute(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_instant("not a date").is_err());
        assert!(parse_instant("2024-13-45").is_err());
    }

    #[test]
    fn day_key_is_iso_date() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(day_key(d), "2024-02-05");
    }
}
