use notch_ui::{Color, DrawCommand, Px, PxPosition, PxRect, PxSize};

/// Resolved paint parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SliderStyle {
    pub handle_diameter: Px,
    pub track_thickness: Px,
    pub active_track: Color,
    pub inactive_track: Color,
    pub handle: Color,
}

/// The full-width track bar, vertically centred in `bounds`.
///
/// Negative extents collapse to zero.
pub(super) fn track_rect(bounds: PxRect, thickness: Px) -> PxRect {
    let thickness = thickness.min(bounds.height).max(Px::ZERO);
    let y = bounds.y + (bounds.height - thickness) / 2.0;
    PxRect::new(bounds.x, y, bounds.width.max(Px::ZERO), thickness)
}

/// The part of the track left of the handle.
pub(super) fn active_segment_rect(bounds: PxRect, thickness: Px, position: f64) -> PxRect {
    let track = track_rect(bounds, thickness);
    let width = Px(position as f32).clamp(Px::ZERO, track.width);
    PxRect::new(track.x, track.y, width, track.height)
}

/// Centre of the handle: `position` pixels right of the track's left edge.
pub(super) fn handle_center(bounds: PxRect, position: f64) -> PxPosition {
    PxPosition::new(bounds.x + Px(position as f32), bounds.center().y)
}

/// Square hit area of the handle.
pub(super) fn handle_rect(bounds: PxRect, position: f64, diameter: Px) -> PxRect {
    PxRect::centered_at(
        handle_center(bounds, position),
        PxSize::new(diameter, diameter),
    )
}

/// Appends track, active segment and handle, back to front.
pub(super) fn render_slider(
    bounds: PxRect,
    position: f64,
    style: &SliderStyle,
    commands: &mut Vec<DrawCommand>,
) {
    commands.push(DrawCommand::Rect {
        rect: track_rect(bounds, style.track_thickness),
        color: style.inactive_track,
    });
    commands.push(DrawCommand::Rect {
        rect: active_segment_rect(bounds, style.track_thickness, position),
        color: style.active_track,
    });
    commands.push(DrawCommand::Circle {
        center: handle_center(bounds, position),
        radius: style.handle_diameter / 2.0,
        color: style.handle,
    });
}
