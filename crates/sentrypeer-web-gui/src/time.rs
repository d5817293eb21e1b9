//! Human-relative rendering of timestamps ("3 minutes ago")

use chrono::{DateTime, Utc};

/// Formats an instant relative to "now"
pub trait RelativeTimeFormatter {
    fn format(&self, then: DateTime<Utc>, now: DateTime<Utc>) -> String;
}

/// English "time ago" phrasing with rounding thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeAgo;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

impl RelativeTimeFormatter for TimeAgo {
    fn format(&self, then: DateTime<Utc>, now: DateTime<Utc>) -> String {
        // Clock skew between daemon and browser can put events in the future
        let secs = (now - then).num_seconds().max(0);

        if secs < 45 {
            "a few seconds ago".to_string()
        } else if secs < 90 {
            "a minute ago".to_string()
        } else if secs < 45 * MINUTE {
            format!("{} minutes ago", round_div(secs, MINUTE).max(2))
        } else if secs < 90 * MINUTE {
            "an hour ago".to_string()
        } else if secs < 22 * HOUR {
            format!("{} hours ago", round_div(secs, HOUR).max(2))
        } else if secs < 36 * HOUR {
            "a day ago".to_string()
        } else if secs < 26 * DAY {
            format!("{} days ago", round_div(secs, DAY).max(2))
        } else if secs < 45 * DAY {
            "a month ago".to_string()
        } else if secs < 320 * DAY {
            format!("{} months ago", round_div(secs, 30 * DAY).max(2))
        } else if secs < 548 * DAY {
            "a year ago".to_string()
        } else {
            format!("{} years ago", round_div(secs, 365 * DAY).max(2))
        }
    }
}

fn round_div(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}

/// Absolute UTC rendering used for tooltips
pub fn format_absolute(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
