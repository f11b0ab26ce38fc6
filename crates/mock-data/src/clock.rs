//! Clock adapters for pinning the reference instant of a run.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// A clock frozen at one instant.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use mock_data::FixedClock;
/// use mockable::Clock;
///
/// let instant = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("valid");
/// let clock = FixedClock::new(instant);
/// assert_eq!(clock.utc(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    utc_now: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always reports `utc_now`.
    #[must_use]
    pub const fn new(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}
