//! Time and timestamp helpers.

use chrono::{DateTime, SubsecRound, Utc};

/// UTC timestamp used for question deadlines, answer updates and session expiry.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to whole microseconds.
///
/// Storage keeps microsecond precision, so values produced here survive a
/// round-trip through the database unchanged.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now().trunc_subsecs(6);
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_drop_sub_microsecond_precision() {
        assert_eq!(now().nanosecond() % 1_000, 0);
    }
}
