//! Injected time source.
//!
//! All session and report code reads the current time through [`Clock`]
//! instead of calling the wall clock directly, so tests can pin "now".

use jiff::Zoned;
use jiff::civil::DateTime;

use crate::types::TIMESTAMP_FMT;

pub trait Clock {
    /// Current local date and time
    fn now(&self) -> DateTime;
}

/// Wall-clock time in the system timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        Zoned::now().datetime()
    }
}

/// A clock frozen at a given instant, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime);

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}

/// Render a clock reading in the persisted timestamp format
pub fn format_timestamp(dt: DateTime) -> String {
    dt.strftime(TIMESTAMP_FMT).to_string()
}
