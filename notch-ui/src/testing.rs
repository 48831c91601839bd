//! Deterministic helpers for driving a viewport in tests.
//!
//! Enabled for this crate's own tests and, for dependents, through the
//! `testing` feature.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;

use crate::{
    Px, PxPosition, PxSize,
    clock::Clock,
    cursor::{CursorEvent, PressKeyEventType},
    viewport::{Viewport, ViewportEvent},
};

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Starts at the current wall-clock instant.
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Plays the renderer's role against a [`Viewport`]: feeds it pointer,
/// resize and layout events and advances time.
#[derive(Debug)]
pub struct TestHost {
    viewport: Viewport,
    clock: Arc<ManualClock>,
    pointer: Option<PxPosition>,
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHost {
    /// A host with a fresh viewport on a manual clock.
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        Self {
            viewport: Viewport::with_clock(clock.clone()),
            clock,
            pointer: None,
        }
    }

    /// The viewport being driven.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Moves the pointer to `(x, y)` and broadcasts the move.
    pub fn move_to(&mut self, x: f32, y: f32) -> usize {
        let position = PxPosition::new(Px(x), Px(y));
        self.pointer = Some(position);
        self.viewport.dispatch(ViewportEvent::Cursor(CursorEvent::moved(
            self.viewport.now(),
            position,
        )))
    }

    /// Moves to `(x, y)` and presses the left button there.
    pub fn press_at(&mut self, x: f32, y: f32) -> usize {
        self.move_to(x, y);
        self.press(PressKeyEventType::Left)
    }

    /// Presses `button` at the current pointer position.
    pub fn press(&mut self, button: PressKeyEventType) -> usize {
        self.viewport.dispatch(ViewportEvent::Cursor(CursorEvent::pressed(
            self.viewport.now(),
            self.pointer,
            button,
        )))
    }

    /// Releases the left button at the current pointer position.
    pub fn release(&mut self) -> usize {
        self.viewport.dispatch(ViewportEvent::Cursor(CursorEvent::released(
            self.viewport.now(),
            self.pointer,
            PressKeyEventType::Left,
        )))
    }

    /// Broadcasts a resize to `width` x `height`.
    pub fn resize(&mut self, width: f32, height: f32) -> usize {
        self.viewport
            .dispatch(ViewportEvent::Resized(PxSize::new(Px(width), Px(height))))
    }

    /// Broadcasts the end of a layout pass.
    pub fn layout_completed(&mut self) -> usize {
        self.viewport.dispatch(ViewportEvent::LayoutCompleted)
    }

    /// Advances the clock and runs every timer that became due.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.clock.advance(by);
        self.viewport.run_due_timers()
    }

    /// Consumes the viewport's redraw request.
    pub fn take_redraw(&mut self) -> bool {
        self.viewport.take_redraw_request()
    }
}
