//! A draggable slider that maps horizontal pointer position to an integer.
//!
//! ## Usage
//!
//! Mount the slider against the host's [`Viewport`] and the [`ElementRef`]
//! the host lays the track out into. The slider listens to pointer events
//! across the whole viewport, so a drag keeps tracking when the pointer leaves
//! the track, and it re-measures the track once a burst of window resizes has
//! settled. Dropping the [`Slider`] detaches every listener and cancels any
//! pending re-measure.
//!
//! ```
//! use notch_components::slider::{Slider, SliderArgs};
//! use notch_ui::{ElementRef, Px, PxRect, Viewport};
//!
//! # fn main() -> Result<(), notch_components::SliderError> {
//! let viewport = Viewport::new();
//! let track = ElementRef::new();
//! track.set_bounds(PxRect::new(Px(20.0), Px(40.0), Px(200.0), Px(20.0)));
//!
//! let slider = Slider::mount(
//!     &viewport,
//!     track,
//!     SliderArgs::default()
//!         .value(25)
//!         .range(50)
//!         .on_change(|value| println!("slider moved to {value}")),
//! )?;
//! assert_eq!(slider.position(), 100.0);
//! # Ok(())
//! # }
//! ```
use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use derive_setters::Setters;
use notch_ui::{
    CallbackWith, Color, CursorEvent, CursorEventContent, Debouncer, DrawCommand, ElementRef,
    EventKind, PressKeyEventType, Px, Subscription, Viewport, ViewportEvent, WeakViewport,
    config::DEFAULT_RESIZE_DEBOUNCE,
};
use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::debug;

use crate::error::SliderError;

use render::{SliderStyle, handle_rect, render_slider};

pub use geometry::{TrackGeometry, pixel_to_value, value_to_pixel};
pub use interaction::{DragState, MoveOutcome, OvershootPolicy, RenderState, SliderController};

mod geometry;
mod interaction;
mod render;

const HANDLE_DIAMETER: Px = Px(16.0);
const TRACK_THICKNESS: Px = Px(4.0);

/// A validated value and range: `range >= 1` and `value` in `[0, range]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderConfig {
    value: i32,
    range: i32,
}

impl SliderConfig {
    /// Validates `value` against the domain `[0, range]`.
    pub fn new(value: i32, range: i32) -> Result<Self, SliderError> {
        if range < 1 {
            return Err(SliderError::InvalidRange(range));
        }
        if !(0..=range).contains(&value) {
            return Err(SliderError::ValueOutOfRange { value, range });
        }
        Ok(Self { value, range })
    }

    /// The value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// The upper bound of the domain.
    pub fn range(&self) -> i32 {
        self.range
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            value: 0,
            range: 100,
        }
    }
}

/// Arguments for [`Slider::mount`].
#[derive(PartialEq, Clone, Setters)]
pub struct SliderArgs {
    /// Initial value, in `[0, range]`.
    pub value: i32,
    /// Upper bound of the value domain; at least 1.
    pub range: i32,
    /// Called with the new value on every accepted pointer move while
    /// dragging.
    #[setters(skip)]
    pub on_change: CallbackWith<i32>,
    /// Handling of pointer moves that leave the track while dragging.
    pub overshoot: OvershootPolicy,
    /// Diameter of the round handle.
    pub handle_diameter: Px,
    /// Height of the track bar.
    pub track_thickness: Px,
    /// Colour of the track left of the handle.
    pub active_track_color: Color,
    /// Colour of the track right of the handle.
    pub inactive_track_color: Color,
    /// Colour of the handle.
    pub handle_color: Color,
    /// Quiet period after the last resize before the track is re-measured.
    pub resize_debounce: Duration,
}

impl SliderArgs {
    /// Sets the on_change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the on_change handler using a shared callback.
    pub fn on_change_shared(mut self, on_change: impl Into<CallbackWith<i32>>) -> Self {
        self.on_change = on_change.into();
        self
    }

    /// Validates `value` and `range`.
    pub fn config(&self) -> Result<SliderConfig, SliderError> {
        SliderConfig::new(self.value, self.range)
    }

    fn style(&self) -> SliderStyle {
        SliderStyle {
            handle_diameter: self.handle_diameter,
            track_thickness: self.track_thickness,
            active_track: self.active_track_color,
            inactive_track: self.inactive_track_color,
            handle: self.handle_color,
        }
    }
}

impl Default for SliderArgs {
    fn default() -> Self {
        let config = SliderConfig::default();
        Self {
            value: config.value(),
            range: config.range(),
            on_change: CallbackWith::new(|_| {}),
            overshoot: OvershootPolicy::default(),
            handle_diameter: HANDLE_DIAMETER,
            track_thickness: TRACK_THICKNESS,
            active_track_color: Color::from_rgb_u8(0x67, 0x50, 0xa4),
            inactive_track_color: Color::from_rgb_u8(0xe8, 0xde, 0xf8),
            handle_color: Color::from_rgb_u8(0x67, 0x50, 0xa4),
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
        }
    }
}

struct SliderInner {
    controller: SliderController,
    element: ElementRef,
    viewport: WeakViewport,
    on_change: CallbackWith<i32>,
    style: SliderStyle,
    awaiting_layout: bool,
}

impl SliderInner {
    fn request_redraw(&self) {
        if let Some(viewport) = self.viewport.upgrade() {
            viewport.request_redraw();
        }
    }
}

/// A mounted slider.
///
/// Owns its viewport listeners and its resize debounce timer; both are
/// released when the slider is dropped.
pub struct Slider {
    subscriptions: SmallVec<[Subscription; 5]>,
    debouncer: Arc<Debouncer>,
    inner: Arc<Mutex<SliderInner>>,
}

impl Slider {
    /// Attaches a slider to `viewport`, measuring its track from `element`.
    ///
    /// Fails if `args` carries an invalid value or range. If `element` has not
    /// been laid out yet, measurement is retried after the next layout pass.
    pub fn mount(
        viewport: &Viewport,
        element: ElementRef,
        args: SliderArgs,
    ) -> Result<Self, SliderError> {
        let config = args.config()?;
        let inner = Arc::new(Mutex::new(SliderInner {
            controller: SliderController::new(config, args.overshoot),
            element,
            viewport: viewport.downgrade(),
            on_change: args.on_change.clone(),
            style: args.style(),
            awaiting_layout: false,
        }));

        let debouncer = {
            let inner = Arc::downgrade(&inner);
            Arc::new(Debouncer::new(viewport, args.resize_debounce, move || {
                if let Some(inner) = inner.upgrade() {
                    recalc_width_and_position(&inner);
                }
            }))
        };

        let mut subscriptions = SmallVec::new();
        subscriptions.push(viewport.subscribe(
            EventKind::PointerDown,
            cursor_listener(&inner, handle_pointer_down),
        ));
        subscriptions.push(viewport.subscribe(
            EventKind::PointerMove,
            cursor_listener(&inner, handle_pointer_move),
        ));
        subscriptions.push(viewport.subscribe(
            EventKind::PointerUp,
            cursor_listener(&inner, handle_pointer_up),
        ));
        subscriptions.push(viewport.subscribe(EventKind::Resize, {
            let debouncer = Arc::downgrade(&debouncer);
            move |_event: ViewportEvent| {
                if let Some(debouncer) = debouncer.upgrade() {
                    debouncer.trigger();
                }
            }
        }));
        subscriptions.push(viewport.subscribe(EventKind::Layout, {
            let inner = Arc::downgrade(&inner);
            move |_event: ViewportEvent| {
                let Some(inner) = inner.upgrade() else {
                    return;
                };
                let awaiting_layout = inner.lock().awaiting_layout;
                if awaiting_layout {
                    recalc_width_and_position(&inner);
                }
            }
        }));

        recalc_width_and_position(&inner);
        debug!(
            "Slider mounted with value {} in 0..={}",
            config.value(),
            config.range()
        );

        Ok(Self {
            subscriptions,
            debouncer,
            inner,
        })
    }

    /// Re-measures the track and moves the handle to the current value.
    ///
    /// Runs automatically after mount and after each settled resize burst.
    pub fn recalc_width_and_position(&self) {
        recalc_width_and_position(&self.inner);
    }

    /// Replaces value and range. The handle moves without notifying
    /// `on_change`; the drag state is kept.
    pub fn set_config(&self, config: SliderConfig) {
        let inner = &mut *self.inner.lock();
        inner.controller.set_config(config);
        inner.request_redraw();
    }

    /// Changes how off-track moves are handled.
    pub fn set_overshoot(&self, overshoot: OvershootPolicy) {
        self.inner.lock().controller.set_overshoot(overshoot);
    }

    /// Starts a drag without a pointer-down on the handle.
    pub fn start_drag(&self) {
        self.inner.lock().controller.start_drag();
    }

    /// The current value.
    pub fn value(&self) -> i32 {
        self.inner.lock().controller.value()
    }

    /// Handle offset from the track's left edge.
    pub fn position(&self) -> f64 {
        self.inner.lock().controller.position()
    }

    /// Current drag state.
    pub fn drag_state(&self) -> DragState {
        self.inner.lock().controller.drag_state()
    }

    /// Returns whether the handle is currently being dragged.
    pub fn is_dragging(&self) -> bool {
        self.inner.lock().controller.is_dragging()
    }

    /// The last measured track geometry.
    pub fn geometry(&self) -> Option<TrackGeometry> {
        self.inner.lock().controller.geometry()
    }

    /// Handle offset and value.
    pub fn render_state(&self) -> RenderState {
        self.inner.lock().controller.render_state()
    }

    /// The active value and range.
    pub fn config(&self) -> SliderConfig {
        self.inner.lock().controller.config()
    }

    /// Whether a debounced re-measure is scheduled.
    pub fn is_recalc_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Appends the track and handle at the element's current bounds.
    ///
    /// Draws nothing while the element is not laid out.
    pub fn draw(&self, commands: &mut Vec<DrawCommand>) {
        let inner = self.inner.lock();
        if let Some(bounds) = inner.element.bounding_rect() {
            render_slider(
                bounds,
                inner.controller.position(),
                &inner.style,
                commands,
            );
        }
    }
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Slider")
            .field("controller", &inner.controller)
            .field("awaiting_layout", &inner.awaiting_layout)
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

fn cursor_listener(
    inner: &Arc<Mutex<SliderInner>>,
    handler: fn(&Mutex<SliderInner>, &CursorEvent),
) -> impl Fn(ViewportEvent) + Send + Sync + 'static {
    let inner: Weak<Mutex<SliderInner>> = Arc::downgrade(inner);
    move |event| {
        if let ViewportEvent::Cursor(cursor) = event
            && let Some(inner) = inner.upgrade()
        {
            handler(&inner, &cursor);
        }
    }
}

fn handle_pointer_down(inner: &Mutex<SliderInner>, event: &CursorEvent) {
    if event.content != CursorEventContent::Pressed(PressKeyEventType::Left) {
        return;
    }
    let Some(pointer) = event.position else {
        return;
    };
    let inner = &mut *inner.lock();
    let Some(bounds) = inner.element.bounding_rect() else {
        return;
    };
    let hit = handle_rect(
        bounds,
        inner.controller.position(),
        inner.style.handle_diameter,
    );
    if hit.contains(pointer) {
        inner.controller.start_drag();
    }
}

fn handle_pointer_move(inner: &Mutex<SliderInner>, event: &CursorEvent) {
    let Some(pointer) = event.position else {
        return;
    };
    let (outcome, on_change, viewport) = {
        let inner = &mut *inner.lock();
        let outcome = inner.controller.pointer_moved(f64::from(pointer.x.0));
        (outcome, inner.on_change.clone(), inner.viewport.clone())
    };
    if let MoveOutcome::Accepted(value) = outcome {
        on_change.call(value);
        if let Some(viewport) = viewport.upgrade() {
            viewport.request_redraw();
        }
    }
}

fn handle_pointer_up(inner: &Mutex<SliderInner>, _event: &CursorEvent) {
    inner.lock().controller.end_drag();
}

fn recalc_width_and_position(inner: &Mutex<SliderInner>) {
    let inner = &mut *inner.lock();
    let geometry = TrackGeometry::measure(&inner.element);
    inner.controller.recalculate(geometry);
    match geometry {
        Some(geometry) => {
            inner.awaiting_layout = false;
            debug!(
                "Slider track measured: width {} at x {}",
                geometry.width, geometry.origin_x
            );
            inner.request_redraw();
        }
        None => {
            inner.awaiting_layout = true;
            debug!("Slider track not laid out yet; waiting for layout");
        }
    }
}
