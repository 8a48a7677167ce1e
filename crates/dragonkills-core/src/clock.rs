//! Clock abstractions for determinism.

use chrono::{DateTime, Utc};

/// Abstraction over system (wall) time.
pub trait Clock: Send + Sync {
    /// Returns the current wall time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Abstraction over in-game time.
///
/// Game days usually run faster than real days, so game time is kept
/// separately from wall time.
pub trait TimeKeeper: Send + Sync {
    /// Returns the current game time.
    fn game_time(&self) -> DateTime<Utc>;

    /// Returns `true` if a character whose last new day happened at `last`
    /// is due a new day. A character that never had one is always due.
    fn is_new_day(&self, last: Option<DateTime<Utc>>) -> bool {
        match last {
            None => true,
            Some(last) => last.date_naive() < self.game_time().date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    struct StaticTimeKeeper(DateTime<Utc>);

    impl TimeKeeper for StaticTimeKeeper {
        fn game_time(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_is_new_day_when_never_had_one() {
        let keeper = StaticTimeKeeper(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());

        assert!(keeper.is_new_day(None));
    }

    #[test]
    fn test_is_new_day_only_after_date_changes() {
        // Arrange
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let keeper = StaticTimeKeeper(now);

        // Act / Assert
        assert!(!keeper.is_new_day(Some(now - Duration::hours(9))));
        assert!(keeper.is_new_day(Some(now - Duration::hours(11))));
        assert!(keeper.is_new_day(Some(now - Duration::days(365))));
    }
}
