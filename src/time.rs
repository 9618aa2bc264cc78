//! Duration formatting for the status line.

use std::time::Duration;

/// Text shown when a duration is missing or not a valid length.
pub const UNKNOWN: &str = "Unknown";

/// Format `seconds` as `M:SS`.
///
/// Minutes are not wrapped at 60 (`3600.0` renders as `60:00`) and both parts
/// are floored. Anything that is not a finite, non-negative number renders as
/// [`UNKNOWN`].
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return UNKNOWN.to_string();
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}

/// Format an optional duration, treating `None` as unknown.
pub fn format_duration(d: Option<Duration>) -> String {
    match d {
        Some(d) => format_time(d.as_secs_f64()),
        None => UNKNOWN.to_string(),
    }
}
