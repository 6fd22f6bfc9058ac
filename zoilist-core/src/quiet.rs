//! Quiet period detection
//!
//! During the quiet month nobody gets pinged: the notifier addresses the
//! working group by name instead of by mention, and the reminder job stays
//! silent altogether.

use chrono::{DateTime, Datelike, Utc};

/// Calendar month (1-based) during which notifications are toned down
const QUIET_MONTH: u32 = 12;

/// Whether `now` falls inside the quiet period
pub fn is_quiet_period(now: DateTime<Utc>) -> bool {
    now.month() == QUIET_MONTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_december_is_quiet() {
        let now = Utc.with_ymd_and_hms(2023, 12, 25, 12, 0, 0).unwrap();
        assert!(is_quiet_period(now));
    }

    #[test]
    fn test_december_boundaries() {
        assert!(is_quiet_period(
            Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap()
        ));
        assert!(is_quiet_period(
            Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()
        ));
        assert!(!is_quiet_period(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        ));
    }

    #[test]
    fn test_other_months_are_not_quiet() {
        for month in 1..12 {
            let now = Utc.with_ymd_and_hms(2023, month, 11, 0, 0, 0).unwrap();
            assert!(!is_quiet_period(now), "month {} should not be quiet", month);
        }
    }
}
