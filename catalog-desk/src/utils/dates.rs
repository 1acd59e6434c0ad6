//! Date arithmetic helpers

use chrono::{DateTime, Utc};

use crate::constants::AMOUNT_OF_DAYS_TO_BE_NEW;

/// Amount of whole days between two instants, floored.
///
/// Negative when `end` precedes `start`.
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = end.timestamp_millis() - start.timestamp_millis();
    let one_day = 1000 * 60 * 60 * 24;

    millis.div_euclid(one_day)
}

/// Amount of whole days between an instant and now
pub fn days_since(date: DateTime<Utc>) -> i64 {
    days_between(date, Utc::now())
}

/// Whether an entity dated `date` still counts as new
pub fn is_new(date: DateTime<Utc>) -> bool {
    days_since(date) <= AMOUNT_OF_DAYS_TO_BE_NEW
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_days_between_floors() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 3, 23, 59, 0).unwrap();

        assert_eq!(days_between(start, end), 2);
    }

    #[test]
    fn test_days_between_negative_when_reversed() {
        let start = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(days_between(start, end), -2);
    }

    #[test]
    fn test_is_new_within_a_week() {
        assert!(is_new(Utc::now() - Duration::days(3)));
        assert!(!is_new(Utc::now() - Duration::days(8)));
    }
}
