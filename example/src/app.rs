use std::time::Duration;

use notch_components::slider::{Slider, SliderArgs};
use notch_ui::{DrawCommand, ElementRef, NotchApp, Px, PxRect, PxSize, Viewport};
use tracing::{error, info};

const MARGIN: Px = Px(32.0);
const TRACK_HEIGHT: Px = Px(24.0);

/// One slider centred in the window, logging every value it emits.
pub struct DemoApp {
    track: ElementRef,
    resize_debounce: Duration,
    slider: Option<Slider>,
}

impl DemoApp {
    pub fn new(resize_debounce: Duration) -> Self {
        Self {
            track: ElementRef::new(),
            resize_debounce,
            slider: None,
        }
    }

    pub fn slider(&self) -> Option<&Slider> {
        self.slider.as_ref()
    }

    fn slider_args(&self) -> SliderArgs {
        SliderArgs::default()
            .value(50)
            .range(100)
            .resize_debounce(self.resize_debounce)
            .on_change(|value| info!("Slider value: {value}"))
    }
}

impl NotchApp for DemoApp {
    fn mount(&mut self, viewport: &Viewport) {
        match Slider::mount(viewport, self.track.clone(), self.slider_args()) {
            Ok(slider) => self.slider = Some(slider),
            Err(err) => error!("Failed to mount slider: {err}"),
        }
    }

    fn layout(&mut self, size: PxSize) {
        let width = (size.width - MARGIN * 2.0).max(Px::ZERO);
        let y = (size.height - TRACK_HEIGHT) / 2.0;
        self.track.set_bounds(PxRect::new(MARGIN, y, width, TRACK_HEIGHT));
    }

    fn draw(&self, commands: &mut Vec<DrawCommand>) {
        if let Some(slider) = &self.slider {
            slider.draw(commands);
        }
    }
}

#[cfg(test)]
mod tests {
    use notch_ui::testing::TestHost;

    use super::*;

    fn mounted(width: f32, height: f32) -> (TestHost, DemoApp) {
        let host = TestHost::new();
        let mut app = DemoApp::new(Duration::from_millis(300));
        app.layout(PxSize::new(Px(width), Px(height)));
        app.mount(host.viewport());
        (host, app)
    }

    #[test]
    fn track_fills_width_between_margins() {
        let (_host, app) = mounted(264.0, 100.0);
        let geometry = app.slider().unwrap().geometry().unwrap();
        assert_eq!(geometry.origin_x, 32.0);
        assert_eq!(geometry.width, 200.0);
    }

    #[test]
    fn handle_starts_mid_track() {
        let (_host, app) = mounted(264.0, 100.0);
        assert_eq!(app.slider().unwrap().position(), 100.0);

        let mut commands = Vec::new();
        app.draw(&mut commands);
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn window_resize_rescales_handle() {
        let (mut host, mut app) = mounted(264.0, 100.0);
        app.layout(PxSize::new(Px(164.0), Px(100.0)));
        host.resize(164.0, 100.0);
        host.advance(Duration::from_millis(300));
        assert_eq!(app.slider().unwrap().position(), 50.0);
    }

    #[test]
    fn tiny_window_collapses_track() {
        let (_host, app) = mounted(40.0, 10.0);
        let geometry = app.slider().unwrap().geometry().unwrap();
        assert_eq!(geometry.width, 0.0);
        assert_eq!(app.slider().unwrap().position(), 0.0);
    }
}
