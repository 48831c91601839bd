//! Time source for viewport timers.

use std::time::Instant;

/// Supplies the current instant to the viewport's timer queue.
///
/// The renderer uses [`SystemClock`]; tests swap in a manually advanced
/// clock so debounce windows can be crossed without sleeping.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time via [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
