//! notch-ui is the host runtime for notch controls.
//!
//! # Overview
//!
//! The crate provides the pieces a control needs from its environment and
//! nothing about any particular control:
//!
//! - [`Viewport`]: a window-wide event hub. Controls subscribe to pointer,
//!   resize and layout events and hold the returned [`Subscription`]; the
//!   viewport also owns a timer queue and the redraw request flag.
//! - [`Debouncer`]: trailing-edge coalescing on viewport timers.
//! - [`ElementRef`]: the laid-out bounds of an element, written by the host's
//!   layout pass and read by controls when they measure.
//! - [`Renderer`]: a winit event loop with a softbuffer surface that drives a
//!   [`NotchApp`].
//!
//! # Example
//!
//! ```
//! use notch_ui::{EventKind, Viewport, ViewportEvent};
//!
//! let viewport = Viewport::new();
//! let subscription = viewport.subscribe(EventKind::Layout, |_event: ViewportEvent| {
//!     // re-measure here
//! });
//! assert_eq!(viewport.dispatch(ViewportEvent::LayoutCompleted), 1);
//!
//! drop(subscription);
//! assert_eq!(viewport.dispatch(ViewportEvent::LayoutCompleted), 0);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod clock;
pub mod color;
pub mod config;
pub mod cursor;
pub mod debounce;
pub mod element;
pub mod entry_point;
pub mod prop;
pub mod px;
pub mod renderer;
pub mod viewport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use winit;

pub use crate::{
    clock::{Clock, SystemClock},
    color::Color,
    config::{ConfigError, NotchConfig},
    cursor::{CursorEvent, CursorEventContent, CursorState, PressKeyEventType},
    debounce::Debouncer,
    element::ElementRef,
    entry_point::{EntryPoint, init_tracing},
    prop::{Callback, CallbackWith},
    px::{Px, PxPosition, PxRect, PxSize},
    renderer::{Canvas, DrawCommand, NotchApp, Renderer, RendererError},
    viewport::{EventKind, Subscription, TimerHandle, Viewport, ViewportEvent, WeakViewport},
};
