//! Trailing-edge debouncing on top of viewport timers.

use std::time::Duration;

use parking_lot::Mutex;
use tracing::trace;

use crate::{
    Callback,
    viewport::{TimerHandle, Viewport, WeakViewport},
};

/// Runs a callback once a burst of triggers has been quiet for `window`.
///
/// Every [`trigger`](Self::trigger) cancels the pending timer and schedules a
/// new one, so the callback fires at most once per quiet period and always
/// after the last trigger. Dropping the debouncer cancels the pending timer.
pub struct Debouncer {
    viewport: WeakViewport,
    window: Duration,
    callback: Callback,
    pending: Mutex<Option<TimerHandle>>,
}

impl Debouncer {
    /// Creates a debouncer that schedules `callback` on `viewport`.
    pub fn new(viewport: &Viewport, window: Duration, callback: impl Into<Callback>) -> Self {
        Self {
            viewport: viewport.downgrade(),
            window,
            callback: callback.into(),
            pending: Mutex::new(None),
        }
    }

    /// The quiet period.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restarts the quiet period.
    pub fn trigger(&self) {
        let Some(viewport) = self.viewport.upgrade() else {
            return;
        };
        let mut pending = self.pending.lock();
        if let Some(handle) = pending.take() {
            viewport.clear_timeout(handle);
        }
        *pending = Some(viewport.set_timeout(self.window, self.callback.clone()));
        trace!("Debounce restarted ({:?})", self.window);
    }

    /// Drops a pending invocation, if any.
    pub fn cancel(&self) {
        let handle = self.pending.lock().take();
        if let (Some(handle), Some(viewport)) = (handle, self.viewport.upgrade()) {
            viewport.clear_timeout(handle);
        }
    }

    /// Whether an invocation is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        let Some(viewport) = self.viewport.upgrade() else {
            return false;
        };
        self.pending
            .lock()
            .is_some_and(|handle| viewport.is_timer_pending(handle))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::testing::ManualClock;

    fn setup() -> (Arc<ManualClock>, Viewport, Arc<AtomicUsize>, Debouncer) {
        let clock = Arc::new(ManualClock::new());
        let viewport = Viewport::with_clock(clock.clone());
        let fired = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&fired);
        let debouncer = Debouncer::new(&viewport, Duration::from_millis(300), move || {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        (clock, viewport, fired, debouncer)
    }

    #[test]
    fn burst_collapses_into_one_call_after_quiet_period() {
        let (clock, viewport, fired, debouncer) = setup();

        for _ in 0..5 {
            debouncer.trigger();
            clock.advance(Duration::from_millis(100));
            viewport.run_due_timers();
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(viewport.pending_timers(), 1);

        clock.advance(Duration::from_millis(199));
        viewport.run_due_timers();
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        clock.advance(Duration::from_millis(1));
        viewport.run_due_timers();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn separate_bursts_fire_separately() {
        let (clock, viewport, fired, debouncer) = setup();

        debouncer.trigger();
        clock.advance(Duration::from_millis(300));
        viewport.run_due_timers();
        debouncer.trigger();
        clock.advance(Duration::from_millis(300));
        viewport.run_due_timers();

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn drop_cancels_pending_invocation() {
        let (clock, viewport, fired, debouncer) = setup();

        debouncer.trigger();
        assert!(debouncer.is_pending());
        drop(debouncer);
        assert_eq!(viewport.pending_timers(), 0);

        clock.advance(Duration::from_secs(1));
        viewport.run_due_timers();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
