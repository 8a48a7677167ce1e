//! Test clock: deterministic `Clock` and `TimeKeeper` implementation.

use chrono::{DateTime, Utc};
use dragonkills_core::clock::{Clock, TimeKeeper};

/// A clock whose wall time and game time are the same fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl TimeKeeper for FixedClock {
    fn game_time(&self) -> DateTime<Utc> {
        self.0
    }
}
