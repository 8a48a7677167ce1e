//! Game time that runs faster than wall time.

use chrono::{DateTime, Duration, Utc};
use dragonkills_core::clock::{Clock, TimeKeeper};

/// Maps wall time onto game time, with `days_per_day` game days passing per
/// real day since `epoch`.
pub struct AcceleratedTimeKeeper {
    clock: Box<dyn Clock>,
    epoch: DateTime<Utc>,
    days_per_day: u32,
}

impl AcceleratedTimeKeeper {
    /// Creates a time keeper. A factor of zero is treated as one.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, epoch: DateTime<Utc>, days_per_day: u32) -> Self {
        Self {
            clock,
            epoch,
            days_per_day: days_per_day.max(1),
        }
    }
}

impl TimeKeeper for AcceleratedTimeKeeper {
    fn game_time(&self) -> DateTime<Utc> {
        let elapsed = self.clock.now() - self.epoch;
        let scaled = elapsed
            .num_milliseconds()
            .saturating_mul(i64::from(self.days_per_day));
        self.epoch + Duration::milliseconds(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dragonkills_test_support::FixedClock;

    #[test]
    fn test_game_time_runs_faster_than_wall_time() {
        // Arrange
        let epoch = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let now = epoch + Duration::hours(6);
        let keeper = AcceleratedTimeKeeper::new(Box::new(FixedClock(now)), epoch, 4);

        // Act
        let game_time = keeper.game_time();

        // Assert
        assert_eq!(game_time, epoch + Duration::days(1));
        assert!(keeper.is_new_day(Some(epoch)));
    }
}
