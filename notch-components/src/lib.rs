//! Controls for notch-ui hosts.
//!
//! # Usage
//!
//! Lay out an [`ElementRef`](notch_ui::ElementRef) for the track in your
//! [`NotchApp`](notch_ui::NotchApp), mount a [`Slider`](slider::Slider)
//! against the viewport in `mount`, and forward `draw`.
//!
//! ```no_run
//! use notch_components::slider::{Slider, SliderArgs};
//! use notch_ui::{DrawCommand, ElementRef, EntryPoint, NotchApp, Px, PxRect, PxSize, Viewport};
//!
//! struct App {
//!     track: ElementRef,
//!     slider: Option<Slider>,
//! }
//!
//! impl NotchApp for App {
//!     fn mount(&mut self, viewport: &Viewport) {
//!         self.slider = Slider::mount(viewport, self.track.clone(), SliderArgs::default()).ok();
//!     }
//!
//!     fn layout(&mut self, size: PxSize) {
//!         self.track
//!             .set_bounds(PxRect::new(Px(24.0), Px(40.0), size.width - Px(48.0), Px(24.0)));
//!     }
//!
//!     fn draw(&self, commands: &mut Vec<DrawCommand>) {
//!         if let Some(slider) = &self.slider {
//!             slider.draw(commands);
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), notch_ui::RendererError> {
//! EntryPoint::new(App {
//!     track: ElementRef::new(),
//!     slider: None,
//! })
//! .run_desktop()
//! # }
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod error;
pub mod slider;

pub use error::SliderError;
