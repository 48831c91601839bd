use tracing::{debug, trace};

use super::{
    SliderConfig,
    geometry::{TrackGeometry, pixel_to_value, value_to_pixel},
};

/// Whether the handle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Pointer moves are ignored.
    #[default]
    Idle,
    /// Every pointer move in the viewport is mapped to a value.
    Dragging,
}

/// What the slider currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderState {
    /// Handle offset from the track's left edge, in `[0, width]`.
    pub position: f64,
    /// The mapped value, in `[0, range]`.
    pub value: i32,
}

/// What to do with a pointer move that falls outside the track while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OvershootPolicy {
    /// Ignore the move; the handle stays where it was.
    #[default]
    Reject,
    /// Pin the handle to the nearest end of the track.
    Clamp,
}

/// Result of feeding a pointer move to the [`SliderController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not dragging.
    Idle,
    /// Dragging, but the track has not been measured yet.
    Unmeasured,
    /// Off the track under [`OvershootPolicy::Reject`].
    Rejected,
    /// The handle moved; carries the new value.
    Accepted(i32),
}

/// Drag state machine and the value/position it maintains.
#[derive(Debug, Clone)]
pub struct SliderController {
    drag_state: DragState,
    render: RenderState,
    geometry: Option<TrackGeometry>,
    config: SliderConfig,
    overshoot: OvershootPolicy,
}

impl SliderController {
    /// Creates an idle controller holding `config.value()`.
    pub fn new(config: SliderConfig, overshoot: OvershootPolicy) -> Self {
        Self {
            drag_state: DragState::Idle,
            render: RenderState {
                position: 0.0,
                value: config.value(),
            },
            geometry: None,
            config,
            overshoot,
        }
    }

    /// Current drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag_state
    }

    /// Returns whether the handle is currently being dragged.
    pub fn is_dragging(&self) -> bool {
        self.drag_state == DragState::Dragging
    }

    /// Handle offset and value.
    pub fn render_state(&self) -> RenderState {
        self.render
    }

    /// The current value.
    pub fn value(&self) -> i32 {
        self.render.value
    }

    /// The handle offset from the track's left edge.
    pub fn position(&self) -> f64 {
        self.render.position
    }

    /// The last measured track geometry.
    pub fn geometry(&self) -> Option<TrackGeometry> {
        self.geometry
    }

    /// The active configuration.
    pub fn config(&self) -> SliderConfig {
        self.config
    }

    /// Enters [`DragState::Dragging`]. Returns `false` if already dragging.
    pub fn start_drag(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.drag_state = DragState::Dragging;
        debug!("Slider drag started at value {}", self.render.value);
        true
    }

    /// Returns to [`DragState::Idle`]. Returns `false` if already idle.
    pub fn end_drag(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.drag_state = DragState::Idle;
        debug!("Slider drag ended at value {}", self.render.value);
        true
    }

    /// Maps a viewport pointer x coordinate while dragging.
    ///
    /// On acceptance the position and value are both updated; every other
    /// outcome leaves the controller untouched.
    pub fn pointer_moved(&mut self, pointer_x: f64) -> MoveOutcome {
        if !self.is_dragging() {
            return MoveOutcome::Idle;
        }
        let Some(geometry) = self.geometry else {
            return MoveOutcome::Unmeasured;
        };

        let raw = geometry.offset_of(pointer_x);
        let position = if geometry.contains_offset(raw) {
            raw
        } else {
            match self.overshoot {
                OvershootPolicy::Reject => {
                    trace!("Pointer offset {raw} outside track of width {}", geometry.width);
                    return MoveOutcome::Rejected;
                }
                OvershootPolicy::Clamp => raw.clamp(0.0, geometry.width),
            }
        };

        self.render.position = position;
        self.render.value = pixel_to_value(position, &geometry, self.config.range());
        trace!(
            "Pointer offset {position} mapped to value {}",
            self.render.value
        );
        MoveOutcome::Accepted(self.render.value)
    }

    /// Adopts freshly measured geometry and re-derives the handle offset from
    /// the current value. The drag state is kept.
    ///
    /// `None` marks the geometry unknown; the offset is left as it was.
    pub fn recalculate(&mut self, geometry: Option<TrackGeometry>) {
        self.geometry = geometry;
        self.sync_position();
    }

    /// Replaces the configuration and moves the handle to the new value.
    pub fn set_config(&mut self, config: SliderConfig) {
        self.config = config;
        self.render.value = config.value();
        self.sync_position();
    }

    /// Changes how off-track moves are handled.
    pub fn set_overshoot(&mut self, overshoot: OvershootPolicy) {
        self.overshoot = overshoot;
    }

    fn sync_position(&mut self) {
        if let Some(geometry) = self.geometry {
            self.render.position =
                value_to_pixel(self.render.value, &geometry, self.config.range());
        }
    }
}
