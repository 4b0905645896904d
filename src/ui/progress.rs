//! Duration and timestamp formatting.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Format a timestamp relative to now ("3 minutes ago").
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    let seconds = Utc::now().signed_duration_since(timestamp).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let (count, unit) = if minutes < 60 {
        (minutes, "minute")
    } else if hours < 24 {
        (hours, "hour")
    } else if days == 1 {
        return "yesterday".to_string();
    } else if days < 30 {
        (days, "day")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn ago(d: ChronoDuration) -> String {
        format_relative_time(Utc::now() - d)
    }

    #[test]
    fn relative_time_recent() {
        assert_eq!(format_relative_time(Utc::now()), "just now");
        assert_eq!(ago(ChronoDuration::seconds(30)), "just now");
    }

    #[test]
    fn relative_time_future_shows_just_now() {
        assert_eq!(ago(ChronoDuration::seconds(-300)), "just now");
    }

    #[test]
    fn relative_time_units() {
        assert_eq!(ago(ChronoDuration::minutes(1)), "1 minute ago");
        assert_eq!(ago(ChronoDuration::minutes(15)), "15 minutes ago");
        assert_eq!(ago(ChronoDuration::hours(1)), "1 hour ago");
        assert_eq!(ago(ChronoDuration::hours(5)), "5 hours ago");
        assert_eq!(ago(ChronoDuration::days(1)), "yesterday");
        assert_eq!(ago(ChronoDuration::days(10)), "10 days ago");
        assert_eq!(ago(ChronoDuration::days(65)), "2 months ago");
        assert_eq!(ago(ChronoDuration::days(400)), "1 year ago");
    }

    #[test]
    fn format_duration_ranges() {
        assert_eq!(format_duration(Duration::ZERO), "0ms");
        assert_eq!(format_duration(Duration::from_millis(450)), "450ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }
}
