use chrono::{DateTime, Utc};
use chrono_tz::America::Los_Angeles;

/// Wall-clock format shown to dashboard users. Carries no zone suffix; all
/// timestamps are rendered in US Pacific time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Los_Angeles)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, TimeZone};

    use super::*;

    #[test]
    fn formats_in_pacific_standard_time() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 20, 30, 5).unwrap();

        assert_eq!(format_timestamp(&timestamp), "2024-01-15 12:30:05 PM");
    }

    #[test]
    fn formats_in_pacific_daylight_time() {
        let timestamp = Utc.with_ymd_and_hms(2024, 7, 4, 16, 0, 0).unwrap();

        assert_eq!(format_timestamp(&timestamp), "2024-07-04 09:00:00 AM");
    }

    #[test]
    fn midnight_is_twelve_am() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 16, 8, 0, 0).unwrap();

        assert_eq!(format_timestamp(&timestamp), "2024-01-16 12:00:00 AM");
    }

    #[test]
    fn formatted_timestamps_parse_back() {
        let timestamp = Utc.with_ymd_and_hms(2023, 11, 30, 23, 59, 59).unwrap();
        let formatted = format_timestamp(&timestamp);

        let parsed = NaiveDateTime::parse_from_str(&formatted, TIMESTAMP_FORMAT).unwrap();

        assert_eq!(
            parsed,
            timestamp.with_timezone(&Los_Angeles).naive_local()
        );
    }
}
