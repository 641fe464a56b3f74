//! Time source abstraction.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Services take a `Clock` instead of calling `Utc::now()` directly so that
/// expiry windows and lockout timers can be tested deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System wall-clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
