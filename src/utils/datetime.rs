//! Date and time formatting for the HTML pages.

use chrono::{DateTime, Local, Utc};

use crate::constants::DATETIME_FORMAT;

/// Format a stored UTC timestamp in local time, e.g. "07.03.2024 14:05".
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format(DATETIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_uses_local_time() {
        let local = Local.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).single().unwrap();
        assert_eq!(format_timestamp(&local.with_timezone(&Utc)), "07.03.2024 14:05");
    }

    #[test]
    fn test_format_timestamp_shape() {
        let formatted = format_timestamp(&Utc::now());
        assert_eq!(formatted.len(), 16);
        assert_eq!(&formatted[2..3], ".");
        assert_eq!(&formatted[5..6], ".");
    }
}
