//! Log line format module
//!
//! `[<local time, RFC 3339>] [LEVEL] message`

use chrono::{DateTime, Local, SecondsFormat};

use super::Level;

/// Format a log line with the current local time
pub fn format_line(level: Level, message: &str) -> String {
    format_line_at(Local::now(), level, message)
}

pub fn format_line_at(time: DateTime<Local>, level: Level, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        time.to_rfc3339_opts(SecondsFormat::Millis, false),
        level.label(),
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line() {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let line = format_line_at(time, Level::Warn, "Path traversal attempt blocked");
        assert!(line.starts_with("[2024-03-09T14:05:07.000"));
        assert!(line.ends_with("] [WARN] Path traversal attempt blocked"));
    }

    #[test]
    fn test_level_labels() {
        let time = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(format_line_at(time, Level::Info, "x").contains("] [INFO] x"));
        assert!(format_line_at(time, Level::Error, "x").contains("] [ERROR] x"));
    }
}
