//! Viewport-wide event hub and timer queue.
//!
//! ## Usage
//!
//! Controls subscribe to window-level events (pointer, resize, layout) and
//! keep the returned [`Subscription`] for as long as they live. Dropping the
//! subscription detaches the listener, so a control's listeners never outlive
//! the control.
//!
//! Deferred work is scheduled with [`Viewport::set_timeout`]. The renderer
//! calls [`Viewport::run_due_timers`] from its event loop and sleeps until
//! [`Viewport::next_deadline`]; nothing ever blocks.
//!
//! Everything runs on the event loop thread. Locks only guard the tables
//! themselves: listeners and timer callbacks are invoked after the lock is
//! released, so a listener may subscribe, unsubscribe or schedule timers.

use std::{
    sync::{
        Arc, Weak,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    Callback, CallbackWith, CursorEvent, CursorEventContent, PxSize,
    clock::{Clock, SystemClock},
};

new_key_type! {
    /// Identifies a registered viewport listener.
    pub struct ListenerKey;
    /// Identifies a pending viewport timer.
    pub struct TimerKey;
}

/// An event broadcast to every listener of its [`EventKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// A pointer event anywhere in the window.
    Cursor(CursorEvent),
    /// The window's client area changed size.
    Resized(PxSize),
    /// The host finished a layout pass; element bounds are current.
    LayoutCompleted,
}

/// Listener categories. A listener receives only events of its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`CursorEventContent::Moved`].
    PointerMove,
    /// [`CursorEventContent::Pressed`].
    PointerDown,
    /// [`CursorEventContent::Released`].
    PointerUp,
    /// [`ViewportEvent::Resized`].
    Resize,
    /// [`ViewportEvent::LayoutCompleted`].
    Layout,
}

impl ViewportEvent {
    /// The category this event is delivered under.
    pub fn kind(&self) -> EventKind {
        match self {
            ViewportEvent::Cursor(event) => match event.content {
                CursorEventContent::Moved => EventKind::PointerMove,
                CursorEventContent::Pressed(_) => EventKind::PointerDown,
                CursorEventContent::Released(_) => EventKind::PointerUp,
            },
            ViewportEvent::Resized(_) => EventKind::Resize,
            ViewportEvent::LayoutCompleted => EventKind::Layout,
        }
    }
}

struct Listener {
    kind: EventKind,
    callback: CallbackWith<ViewportEvent>,
}

struct Timer {
    deadline: Instant,
    callback: Callback,
}

struct ViewportShared {
    clock: Arc<dyn Clock>,
    listeners: Mutex<SlotMap<ListenerKey, Listener>>,
    timers: Mutex<SlotMap<TimerKey, Timer>>,
    redraw_requested: AtomicBool,
}

/// Handle to a viewport. Clones share the same hub.
#[derive(Clone)]
pub struct Viewport {
    shared: Arc<ViewportShared>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("listeners", &self.listener_count())
            .field("timers", &self.pending_timers())
            .field("redraw_requested", &self.redraw_requested())
            .finish()
    }
}

impl Viewport {
    /// Creates a viewport driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a viewport whose timers read time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            shared: Arc::new(ViewportShared {
                clock,
                listeners: Mutex::new(SlotMap::with_key()),
                timers: Mutex::new(SlotMap::with_key()),
                redraw_requested: AtomicBool::new(false),
            }),
        }
    }

    /// The current instant according to this viewport's clock.
    pub fn now(&self) -> Instant {
        self.shared.clock.now()
    }

    /// Returns a handle that does not keep the viewport alive.
    pub fn downgrade(&self) -> WeakViewport {
        WeakViewport {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Registers `listener` for events of `kind`.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe`] is called.
    pub fn subscribe(
        &self,
        kind: EventKind,
        listener: impl Into<CallbackWith<ViewportEvent>>,
    ) -> Subscription {
        let key = self.shared.listeners.lock().insert(Listener {
            kind,
            callback: listener.into(),
        });
        trace!("Subscribed listener {key:?} to {kind:?}");
        Subscription {
            viewport: self.downgrade(),
            key,
            kind,
        }
    }

    /// Number of registered listeners across all kinds.
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.lock().len()
    }

    /// Number of registered listeners of `kind`.
    pub fn listener_count_of(&self, kind: EventKind) -> usize {
        self.shared
            .listeners
            .lock()
            .values()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    /// Delivers `event` to every listener of its kind.
    ///
    /// Listeners removed by an earlier listener during the same dispatch are
    /// skipped. Returns the number of listeners invoked.
    pub fn dispatch(&self, event: ViewportEvent) -> usize {
        let kind = event.kind();
        let snapshot: SmallVec<[(ListenerKey, CallbackWith<ViewportEvent>); 8]> = self
            .shared
            .listeners
            .lock()
            .iter()
            .filter(|(_, listener)| listener.kind == kind)
            .map(|(key, listener)| (key, listener.callback.clone()))
            .collect();

        let mut delivered = 0;
        for (key, callback) in snapshot {
            let alive = self.shared.listeners.lock().contains_key(key);
            if !alive {
                continue;
            }
            callback.call(event);
            delivered += 1;
        }
        trace!("Dispatched {kind:?} to {delivered} listener(s)");
        delivered
    }

    /// Schedules `callback` to run once `delay` has elapsed.
    pub fn set_timeout(&self, delay: Duration, callback: impl Into<Callback>) -> TimerHandle {
        let deadline = self.now() + delay;
        let key = self.shared.timers.lock().insert(Timer {
            deadline,
            callback: callback.into(),
        });
        TimerHandle(key)
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn clear_timeout(&self, handle: TimerHandle) -> bool {
        self.shared.timers.lock().remove(handle.0).is_some()
    }

    /// Whether `handle` is still waiting to fire.
    pub fn is_timer_pending(&self, handle: TimerHandle) -> bool {
        self.shared.timers.lock().contains_key(handle.0)
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.shared.timers.lock().len()
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.shared
            .timers
            .lock()
            .values()
            .map(|timer| timer.deadline)
            .min()
    }

    /// Runs every timer whose deadline has passed, earliest first.
    ///
    /// Timers scheduled by a callback run on a later call even when they are
    /// already due. Returns the number of timers fired.
    pub fn run_due_timers(&self) -> usize {
        let now = self.now();
        let mut due: SmallVec<[(Instant, TimerKey); 4]> = self
            .shared
            .timers
            .lock()
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(key, timer)| (timer.deadline, key))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        let mut fired = 0;
        for (_, key) in due {
            let timer = self.shared.timers.lock().remove(key);
            if let Some(timer) = timer {
                timer.callback.call();
                fired += 1;
            }
        }
        if fired > 0 {
            debug!("Fired {fired} viewport timer(s)");
        }
        fired
    }

    /// Asks the renderer to draw a new frame.
    pub fn request_redraw(&self) {
        self.shared.redraw_requested.store(true, Ordering::Release);
    }

    /// Whether a redraw is pending, without consuming the request.
    pub fn redraw_requested(&self) -> bool {
        self.shared.redraw_requested.load(Ordering::Acquire)
    }

    /// Consumes a pending redraw request.
    pub fn take_redraw_request(&self) -> bool {
        self.shared.redraw_requested.swap(false, Ordering::AcqRel)
    }
}

/// A non-owning viewport handle.
#[derive(Clone, Default)]
pub struct WeakViewport {
    shared: Weak<ViewportShared>,
}

impl WeakViewport {
    /// Upgrades to a [`Viewport`] if it is still alive.
    pub fn upgrade(&self) -> Option<Viewport> {
        self.shared.upgrade().map(|shared| Viewport { shared })
    }
}

impl std::fmt::Debug for WeakViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakViewport")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

/// Handle to a pending viewport timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(TimerKey);

/// Keeps a viewport listener registered.
///
/// Dropping the subscription removes the listener.
#[must_use = "dropping a Subscription detaches its listener immediately"]
pub struct Subscription {
    viewport: WeakViewport,
    key: ListenerKey,
    kind: EventKind,
}

impl Subscription {
    /// The kind of event this subscription listens to.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.viewport
            .upgrade()
            .is_some_and(|viewport| viewport.shared.listeners.lock().contains_key(self.key))
    }

    /// Detaches the listener now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(viewport) = self.viewport.upgrade() {
            viewport.shared.listeners.lock().remove(self.key);
            trace!("Unsubscribed listener {:?} from {:?}", self.key, self.kind);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::{Px, PxPosition, testing::ManualClock};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(ViewportEvent) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        (count, move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn moved(viewport: &Viewport, x: f32) -> ViewportEvent {
        ViewportEvent::Cursor(CursorEvent::moved(
            viewport.now(),
            PxPosition::new(Px(x), Px(0.0)),
        ))
    }

    #[test]
    fn dispatch_only_reaches_matching_kind() {
        let viewport = Viewport::new();
        let (moves, on_move) = counter();
        let (resizes, on_resize) = counter();
        let _a = viewport.subscribe(EventKind::PointerMove, on_move);
        let _b = viewport.subscribe(EventKind::Resize, on_resize);

        assert_eq!(viewport.dispatch(moved(&viewport, 1.0)), 1);
        viewport.dispatch(ViewportEvent::Resized(PxSize::ZERO));
        viewport.dispatch(ViewportEvent::Resized(PxSize::ZERO));

        assert_eq!(moves.load(Ordering::SeqCst), 1);
        assert_eq!(resizes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropping_subscription_detaches_listener() {
        let viewport = Viewport::new();
        let (count, listener) = counter();
        let subscription = viewport.subscribe(EventKind::Layout, listener);
        assert!(subscription.is_active());
        assert_eq!(viewport.listener_count(), 1);

        drop(subscription);
        assert_eq!(viewport.listener_count(), 0);
        assert_eq!(viewport.dispatch(ViewportEvent::LayoutCompleted), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listener_removed_mid_dispatch_is_skipped() {
        let viewport = Viewport::new();
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&victim);
        let _killer = viewport.subscribe(EventKind::Layout, move |_| {
            slot.lock().take();
        });
        let (count, listener) = counter();
        *victim.lock() = Some(viewport.subscribe(EventKind::Layout, listener));

        assert_eq!(viewport.dispatch(ViewportEvent::LayoutCompleted), 1);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn subscription_outliving_viewport_is_inert() {
        let viewport = Viewport::new();
        let (_, listener) = counter();
        let subscription = viewport.subscribe(EventKind::Resize, listener);
        drop(viewport);
        assert!(!subscription.is_active());
        drop(subscription);
    }

    #[test]
    fn timers_fire_in_deadline_order_once_due() {
        let clock = Arc::new(ManualClock::new());
        let viewport = Viewport::with_clock(clock.clone());
        let order = Arc::new(Mutex::new(Vec::new()));

        let late = Arc::clone(&order);
        viewport.set_timeout(Duration::from_millis(200), move || late.lock().push("late"));
        let early = Arc::clone(&order);
        viewport.set_timeout(Duration::from_millis(100), move || early.lock().push("early"));

        assert_eq!(
            viewport.next_deadline(),
            Some(clock.now() + Duration::from_millis(100))
        );
        clock.advance(Duration::from_millis(99));
        assert_eq!(viewport.run_due_timers(), 0);

        clock.advance(Duration::from_millis(150));
        assert_eq!(viewport.run_due_timers(), 2);
        assert_eq!(*order.lock(), vec!["early", "late"]);
        assert_eq!(viewport.next_deadline(), None);
    }

    #[test]
    fn cleared_timer_never_fires() {
        let clock = Arc::new(ManualClock::new());
        let viewport = Viewport::with_clock(clock.clone());
        let fired = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&fired);
        let handle = viewport.set_timeout(Duration::from_millis(10), move || {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        assert!(viewport.is_timer_pending(handle));
        assert!(viewport.clear_timeout(handle));
        assert!(!viewport.clear_timeout(handle));
        clock.advance(Duration::from_secs(1));
        assert_eq!(viewport.run_due_timers(), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn redraw_request_is_consumed_once() {
        let viewport = Viewport::new();
        assert!(!viewport.take_redraw_request());
        viewport.request_redraw();
        assert!(viewport.redraw_requested());
        assert!(viewport.take_redraw_request());
        assert!(!viewport.take_redraw_request());
    }
}
