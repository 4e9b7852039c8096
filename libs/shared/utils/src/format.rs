use chrono::{DateTime, Utc};

/// Human-readable date-time used in notification messages, e.g.
/// "Jun 1, 2024, 10:00 AM": abbreviated month, unpadded day and hour,
/// 12-hour clock.
pub fn format_date_time(value: &DateTime<Utc>) -> String {
    value.format("%b %-d, %Y, %-I:%M %p").to_string()
}
