//! # Clock
//!
//! Time source for sale timestamps.
//!
//! The store never calls `Local::now()` itself. It asks the injected
//! [`Clock`], which makes every ledger entry reproducible under test:
//!
//! ```rust
//! use caja_core::clock::{Clock, FixedClock};
//! use chrono::NaiveDate;
//!
//! let clock = FixedClock::new(
//!     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 30, 0).unwrap(),
//! );
//! let handle = clock.clone();
//! handle.advance(chrono::Duration::minutes(5));
//! assert_eq!(clock.now().format("%H:%M:%S").to_string(), "09:35:00");
//! ```

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Duration, Local, NaiveDateTime};

/// Date key of the sales ledger.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time of day stored on each sale record.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A source of the current local date and time.
///
/// Date and time of a sale are both taken from a single `now()` reading.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A settable clock for tests and replays.
///
/// Clones share the same instant, so a test can keep one handle and move
/// the other into the store.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Rc<Cell<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self {
            instant: Rc::new(Cell::new(instant)),
        }
    }

    pub fn set(&self, instant: NaiveDateTime) {
        self.instant.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.instant.set(self.instant.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant.get()
    }
}
