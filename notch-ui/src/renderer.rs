//! # Notch Renderer
//!
//! Owns the window and the event loop, and turns winit events into
//! [`ViewportEvent`]s.
//!
//! ## Overview
//!
//! One winit event loop drives everything:
//! - window events are translated and broadcast through the [`Viewport`]
//! - after every event the viewport's redraw request is forwarded to winit
//! - between events due viewport timers run, and the loop sleeps until the
//!   next deadline
//! - frames are rasterised on the CPU into a softbuffer surface
//!
//! Applications plug in through [`NotchApp`].
//!
//! ## Basic Usage
//!
//! ```no_run
//! use notch_ui::{DrawCommand, NotchApp, PxSize, Renderer, Viewport};
//!
//! struct Blank;
//!
//! impl NotchApp for Blank {
//!     fn mount(&mut self, _viewport: &Viewport) {}
//!     fn layout(&mut self, _size: PxSize) {}
//!     fn draw(&self, _commands: &mut Vec<DrawCommand>) {}
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! Renderer::run(Blank)?;
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod command;

use std::{num::NonZeroU32, sync::Arc};

use softbuffer::{Context, Surface};
use thiserror::Error;
use tracing::{debug, error, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, OwnedDisplayHandle},
    window::{Window, WindowId},
};

use crate::{
    PxPosition, PxSize,
    config::NotchConfig,
    cursor::{CursorEvent, CursorEventContent, CursorState},
    viewport::{Viewport, ViewportEvent},
};

pub use canvas::Canvas;
pub use command::DrawCommand;

/// Errors that stop the renderer.
#[derive(Debug, Error)]
pub enum RendererError {
    /// The event loop could not be created or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// The window could not be created.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// The software presentation surface failed.
    #[error("surface error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}

/// Application hooks driven by the [`Renderer`].
pub trait NotchApp {
    /// Called once, after the first layout pass, to attach controls to the
    /// viewport.
    fn mount(&mut self, viewport: &Viewport);

    /// Places elements for a client area of `size`. Runs before every
    /// resize is broadcast.
    fn layout(&mut self, size: PxSize);

    /// Appends this frame's draw commands, back to front.
    fn draw(&self, commands: &mut Vec<DrawCommand>);
}

/// Window, event loop and software renderer for a [`NotchApp`].
pub struct Renderer<A: NotchApp> {
    app: A,
    config: NotchConfig,
    viewport: Viewport,
    cursor_state: CursorState,
    window: Option<Arc<Window>>,
    context: Option<Context<OwnedDisplayHandle>>,
    surface: Option<Surface<OwnedDisplayHandle, Arc<Window>>>,
    mounted: bool,
    commands: Vec<DrawCommand>,
    fatal: Option<RendererError>,
}

impl<A: NotchApp> Renderer<A> {
    /// Runs `app` with the default [`NotchConfig`].
    pub fn run(app: A) -> Result<(), RendererError> {
        Self::run_with_config(app, NotchConfig::default())
    }

    /// Runs `app` until its window is closed.
    #[tracing::instrument(level = "info", skip(app))]
    pub fn run_with_config(app: A, config: NotchConfig) -> Result<(), RendererError> {
        let event_loop = EventLoop::new()?;
        let mut renderer = Self::new(app, config, Viewport::new());
        event_loop.run_app(&mut renderer)?;
        match renderer.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn new(app: A, config: NotchConfig, viewport: Viewport) -> Self {
        Self {
            app,
            config,
            viewport,
            cursor_state: CursorState::default(),
            window: None,
            context: None,
            surface: None,
            mounted: false,
            commands: Vec::new(),
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RendererError) {
        error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RendererError> {
        let attributes = Window::default_attributes()
            .with_title(&self.config.window_title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);
        let context = Context::new(event_loop.owned_display_handle())?;
        let surface = Surface::new(&context, window.clone())?;

        self.window = Some(window);
        self.context = Some(context);
        self.surface = Some(surface);
        Ok(())
    }

    fn run_layout(&mut self, size: PxSize) {
        self.app.layout(size);
        self.viewport.dispatch(ViewportEvent::LayoutCompleted);
    }

    fn handle_resized(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        let size = PxSize::from(size);
        if size.is_empty() {
            debug!("Window minimized; skipping layout");
            return;
        }
        self.app.layout(size);
        self.viewport.dispatch(ViewportEvent::Resized(size));
        self.viewport.dispatch(ViewportEvent::LayoutCompleted);
        self.viewport.request_redraw();
    }

    fn handle_cursor_moved(&mut self, position: winit::dpi::PhysicalPosition<f64>) {
        let position = PxPosition::from(position);
        self.cursor_state.update_position(position);
        let event = CursorEvent::moved(self.viewport.now(), position);
        self.viewport.dispatch(ViewportEvent::Cursor(event));
    }

    fn handle_mouse_input(
        &mut self,
        state: winit::event::ElementState,
        button: winit::event::MouseButton,
    ) {
        let Some(content) = CursorEventContent::from_press_event(state, button) else {
            return;
        };
        debug!("Mouse input: {state:?} button {button:?}");
        let event = CursorEvent {
            timestamp: self.viewport.now(),
            position: self.cursor_state.position(),
            content,
        };
        self.viewport.dispatch(ViewportEvent::Cursor(event));
    }

    fn handle_redraw_requested(&mut self) {
        let (Some(window), Some(surface)) = (self.window.as_ref(), self.surface.as_mut()) else {
            return;
        };
        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        if let Err(err) = surface.resize(width, height) {
            warn!("Failed to resize surface: {err}");
            return;
        }

        self.commands.clear();
        self.app.draw(&mut self.commands);

        let mut buffer = match surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(err) => {
                warn!("Failed to acquire frame buffer: {err}");
                return;
            }
        };
        {
            let Some(mut canvas) =
                Canvas::new(&mut buffer, width.get() as usize, height.get() as usize)
            else {
                warn!("Frame buffer smaller than {width}x{height}");
                return;
            };
            canvas.clear(self.config.clear_color);
            canvas.draw_all(&self.commands);
        }
        if let Err(err) = buffer.present() {
            warn!("Failed to present frame: {err}");
        }
    }

    fn forward_redraw_request(&self) {
        if self.viewport.take_redraw_request()
            && let Some(window) = self.window.as_ref()
        {
            window.request_redraw();
        }
    }
}

impl<A: NotchApp> ApplicationHandler for Renderer<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
            return;
        }

        if let Some(size) = self.window.as_ref().map(|window| window.inner_size()) {
            self.run_layout(size.into());
        }
        if !self.mounted {
            self.app.mount(&self.viewport);
            self.mounted = true;
            debug!("Application mounted");
        }
        self.viewport.request_redraw();
        self.forward_redraw_request();
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        debug!("Suspending renderer; dropping surface.");
        self.surface = None;
        self.context = None;
        self.window = None;
        self.cursor_state = CursorState::default();
    }

    #[tracing::instrument(level = "debug", skip(self, event_loop))]
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.handle_resized(size);
            }
            WindowEvent::CursorMoved {
                device_id: _,
                position,
            } => {
                self.handle_cursor_moved(position);
            }
            WindowEvent::CursorLeft { device_id: _ } => {
                self.cursor_state.clear();
            }
            WindowEvent::MouseInput {
                device_id: _,
                state,
                button,
            } => {
                self.handle_mouse_input(state, button);
            }
            WindowEvent::RedrawRequested => {
                self.handle_redraw_requested();
            }
            _ => (),
        }
        self.forward_redraw_request();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.viewport.run_due_timers();
        self.forward_redraw_request();

        match self.viewport.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use winit::{
        dpi::{PhysicalPosition, PhysicalSize},
        event::{ElementState, MouseButton},
    };

    use super::*;
    use crate::{EventKind, PressKeyEventType, Px, testing::ManualClock};

    #[derive(Default)]
    struct RecordingApp {
        layouts: Vec<PxSize>,
    }

    impl NotchApp for RecordingApp {
        fn mount(&mut self, _viewport: &Viewport) {}

        fn layout(&mut self, size: PxSize) {
            self.layouts.push(size);
        }

        fn draw(&self, _commands: &mut Vec<DrawCommand>) {}
    }

    fn renderer() -> Renderer<RecordingApp> {
        let viewport = Viewport::with_clock(Arc::new(ManualClock::new()));
        Renderer::new(RecordingApp::default(), NotchConfig::default(), viewport)
    }

    fn record(
        viewport: &Viewport,
        kinds: &[EventKind],
    ) -> (Vec<crate::Subscription>, Arc<Mutex<Vec<ViewportEvent>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let subscriptions = kinds
            .iter()
            .map(|&kind| {
                let seen = seen.clone();
                viewport.subscribe(kind, move |event: ViewportEvent| seen.lock().push(event))
            })
            .collect();
        (subscriptions, seen)
    }

    #[test]
    fn resize_lays_out_then_broadcasts() {
        let mut renderer = renderer();
        let (_subscriptions, seen) =
            record(&renderer.viewport, &[EventKind::Resize, EventKind::Layout]);

        renderer.handle_resized(PhysicalSize::new(300, 200));

        let size = PxSize::new(Px(300.0), Px(200.0));
        assert_eq!(renderer.app.layouts, vec![size]);
        assert_eq!(
            *seen.lock(),
            vec![ViewportEvent::Resized(size), ViewportEvent::LayoutCompleted]
        );
        assert!(renderer.viewport.redraw_requested());
    }

    #[test]
    fn minimized_window_is_not_laid_out() {
        let mut renderer = renderer();
        let (_subscriptions, seen) =
            record(&renderer.viewport, &[EventKind::Resize, EventKind::Layout]);

        renderer.handle_resized(PhysicalSize::new(0, 0));

        assert!(renderer.app.layouts.is_empty());
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn button_events_carry_last_cursor_position() {
        let mut renderer = renderer();
        let (_subscriptions, seen) = record(
            &renderer.viewport,
            &[EventKind::PointerMove, EventKind::PointerDown],
        );

        renderer.handle_cursor_moved(PhysicalPosition::new(10.0, 20.0));
        renderer.handle_mouse_input(ElementState::Pressed, MouseButton::Left);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        let ViewportEvent::Cursor(press) = seen[1] else {
            panic!("expected a cursor event, got {:?}", seen[1]);
        };
        assert_eq!(
            press.content,
            CursorEventContent::Pressed(PressKeyEventType::Left)
        );
        assert_eq!(press.position, Some(PxPosition::new(Px(10.0), Px(20.0))));
    }

    #[test]
    fn unsupported_buttons_are_dropped() {
        let mut renderer = renderer();
        let (_subscriptions, seen) = record(&renderer.viewport, &[EventKind::PointerDown]);

        renderer.handle_mouse_input(ElementState::Pressed, MouseButton::Back);

        assert!(seen.lock().is_empty());
    }
}
