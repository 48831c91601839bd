//! Pointer events as delivered to viewport listeners.
//!
//! The renderer converts winit's `CursorMoved` / `MouseInput` events into
//! [`CursorEvent`]s and broadcasts them through the viewport. Listeners see
//! every pointer event in the window, not only the ones over their own
//! element, which is what lets a drag continue after the pointer leaves the
//! thing being dragged.

use std::time::Instant;

use crate::PxPosition;

/// The mouse button a press or release refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressKeyEventType {
    /// The primary mouse button (typically left button).
    Left,
    /// The secondary mouse button (typically right button).
    Right,
    /// The middle mouse button (typically scroll wheel click).
    Middle,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorEventContent {
    /// The pointer moved to a new position.
    Moved,
    /// A button went down.
    Pressed(PressKeyEventType),
    /// A button went up.
    Released(PressKeyEventType),
}

impl CursorEventContent {
    /// Creates a press or release event from winit mouse input.
    ///
    /// Returns `None` for buttons other than left, right and middle.
    pub fn from_press_event(
        state: winit::event::ElementState,
        button: winit::event::MouseButton,
    ) -> Option<Self> {
        let event_type = match button {
            winit::event::MouseButton::Left => PressKeyEventType::Left,
            winit::event::MouseButton::Right => PressKeyEventType::Right,
            winit::event::MouseButton::Middle => PressKeyEventType::Middle,
            _ => return None,
        };
        let state = match state {
            winit::event::ElementState::Pressed => Self::Pressed(event_type),
            winit::event::ElementState::Released => Self::Released(event_type),
        };
        Some(state)
    }
}

/// A single pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorEvent {
    /// When the event was received.
    pub timestamp: Instant,
    /// Pointer position at the time of the event.
    ///
    /// `None` when the pointer is outside the window and the platform did not
    /// report a position, e.g. a release after the pointer left the window.
    pub position: Option<PxPosition>,
    /// What happened.
    pub content: CursorEventContent,
}

impl CursorEvent {
    /// A move to `position`.
    pub fn moved(timestamp: Instant, position: PxPosition) -> Self {
        Self {
            timestamp,
            position: Some(position),
            content: CursorEventContent::Moved,
        }
    }

    /// A button press at `position`.
    pub fn pressed(
        timestamp: Instant,
        position: Option<PxPosition>,
        button: PressKeyEventType,
    ) -> Self {
        Self {
            timestamp,
            position,
            content: CursorEventContent::Pressed(button),
        }
    }

    /// A button release at `position`.
    pub fn released(
        timestamp: Instant,
        position: Option<PxPosition>,
        button: PressKeyEventType,
    ) -> Self {
        Self {
            timestamp,
            position,
            content: CursorEventContent::Released(button),
        }
    }
}

/// Tracks the last known pointer position between winit events.
///
/// winit reports button presses without coordinates, so the renderer pairs
/// each press with the most recent `CursorMoved`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CursorState {
    position: Option<PxPosition>,
}

impl CursorState {
    /// Records a new pointer position.
    pub fn update_position(&mut self, position: impl Into<Option<PxPosition>>) {
        self.position = position.into();
    }

    /// The last reported position, if the pointer is inside the window.
    pub fn position(&self) -> Option<PxPosition> {
        self.position
    }

    /// Forgets the position, e.g. when the pointer leaves the window.
    pub fn clear(&mut self) {
        self.position = None;
    }
}

#[cfg(test)]
mod tests {
    use winit::event::{ElementState, MouseButton};

    use super::*;
    use crate::Px;

    #[test]
    fn maps_winit_buttons() {
        assert_eq!(
            CursorEventContent::from_press_event(ElementState::Pressed, MouseButton::Left),
            Some(CursorEventContent::Pressed(PressKeyEventType::Left))
        );
        assert_eq!(
            CursorEventContent::from_press_event(ElementState::Released, MouseButton::Middle),
            Some(CursorEventContent::Released(PressKeyEventType::Middle))
        );
        assert_eq!(
            CursorEventContent::from_press_event(ElementState::Pressed, MouseButton::Back),
            None
        );
    }

    #[test]
    fn cursor_state_remembers_last_position() {
        let mut state = CursorState::default();
        assert_eq!(state.position(), None);
        state.update_position(PxPosition::new(Px(3.0), Px(4.0)));
        assert_eq!(state.position(), Some(PxPosition::new(Px(3.0), Px(4.0))));
        state.clear();
        assert_eq!(state.position(), None);
    }
}
