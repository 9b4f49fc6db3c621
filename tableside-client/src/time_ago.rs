//! Relative timestamps for order cards ("5 minutes ago")

use chrono::{DateTime, Utc};

const UNITS: [(f64, &str); 5] = [
    (31_536_000.0, "year"),
    (2_592_000.0, "month"),
    (86_400.0, "day"),
    (3_600.0, "hour"),
    (60.0, "minute"),
];

/// Largest unit strictly exceeding one, floored; otherwise "just now"
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds() as f64;
    for (unit_secs, name) in UNITS {
        let interval = seconds / unit_secs;
        if interval > 1.0 {
            let count = interval.floor() as i64;
            let plural = if count == 1 { "" } else { "s" };
            return format!("{count} {name}{plural} ago");
        }
    }
    "just now".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_time_ago() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now, now), "just now");
        assert_eq!(format_time_ago(now - Duration::seconds(60), now), "just now");
        assert_eq!(format_time_ago(now - Duration::seconds(90), now), "1 minute ago");
        assert_eq!(format_time_ago(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(format_time_ago(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(format_time_ago(now - Duration::days(40), now), "1 month ago");
        assert_eq!(format_time_ago(now - Duration::days(800), now), "2 years ago");
        // clock skew: order stamped in the future
        assert_eq!(format_time_ago(now + Duration::minutes(5), now), "just now");
    }
}
