//! Id and time utilities

use std::sync::atomic::{AtomicI64, Ordering};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Generate a timestamp-derived String id for a new record.
///
/// Millisecond timestamp, matching the id scheme of the remote catalog
/// service. Two ids requested within the same millisecond are disambiguated
/// by bumping past the last issued value, so ids stay unique and monotonic
/// within the process.
pub fn timestamp_id() -> String {
    let mut candidate = now_millis();

    loop {
        let last = LAST_ISSUED.load(Ordering::Relaxed);
        if candidate <= last {
            candidate = last + 1;
        }

        if LAST_ISSUED
            .compare_exchange(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            return candidate.to_string();
        }
    }
}

/// Derive a stable id from a display name, keeping letters and digits only.
///
/// Used for supplier master records ("Acme Corp." -> "AcmeCorp").
pub fn slug_id(name: &str) -> String {
    name.chars().filter(|c| c.is_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_id_is_numeric() {
        let id = timestamp_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_timestamp_ids_are_unique_within_a_millisecond() {
        let a = timestamp_id();
        let b = timestamp_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_slug_id_keeps_letters_and_numbers() {
        assert_eq!(slug_id("Acme Corp."), "AcmeCorp");
        assert_eq!(slug_id("7-Eleven Inc"), "7ElevenInc");
        assert_eq!(slug_id("  "), "");
    }
}
