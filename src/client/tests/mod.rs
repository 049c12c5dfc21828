//! Unit tests for the client-side board state machinery.


use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant, advanceable by tests.
pub(crate) struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
