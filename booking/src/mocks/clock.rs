//! Mock clock for deterministic tests.

use crate::providers::Clock;
use chrono::{DateTime, Utc};

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// The instant this clock always reports.
    pub time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a clock frozen at `time`.
    #[must_use]
    pub const fn at(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}
