//! Short labels for post and message timestamps.

use chrono::{DateTime, TimeZone};

/// Label for an item that has no timestamp yet.
pub const JUST_NOW: &str = "Just now";

/// Format `then` relative to `now`: clock time within a day, "Yesterday"
/// within two, otherwise month and day.
pub fn format_relative<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let elapsed = now.clone().signed_duration_since(then.clone());
    if elapsed.num_hours() < 24 {
        then.format("%H:%M").to_string()
    } else if elapsed.num_hours() < 48 {
        "Yesterday".to_string()
    } else {
        then.format("%b %-d").to_string()
    }
}

/// Format a stored RFC 3339 timestamp in local time.
pub fn label_rfc3339(timestamp: Option<&str>) -> String {
    let Some(parsed) = timestamp.and_then(|t| DateTime::parse_from_rfc3339(t).ok()) else {
        return JUST_NOW.to_string();
    };
    let then = parsed.with_timezone(&chrono::Local);
    format_relative(&then, &chrono::Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn at(rfc: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_same_day_shows_clock_time() {
        let now = at("2026-05-15T18:30:00Z");
        assert_eq!(format_relative(&at("2026-05-15T09:05:00Z"), &now), "09:05");
    }

    #[test]
    fn test_yesterday() {
        let now = at("2026-05-15T18:30:00Z");
        let then = now - Duration::hours(30);
        assert_eq!(format_relative(&then, &now), "Yesterday");
    }

    #[test]
    fn test_older_shows_date() {
        let now = at("2026-05-15T18:30:00Z");
        assert_eq!(format_relative(&at("2026-04-02T10:00:00Z"), &now), "Apr 2");
    }

    #[test]
    fn test_missing_or_invalid_timestamp() {
        assert_eq!(label_rfc3339(None), JUST_NOW);
        assert_eq!(label_rfc3339(Some("not a date")), JUST_NOW);
    }
}
