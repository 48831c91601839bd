//! Draw commands produced by controls and consumed by the canvas.

use crate::{Color, Px, PxPosition, PxRect};

/// One primitive to rasterise, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// A filled axis-aligned rectangle.
    Rect {
        /// Area to fill.
        rect: PxRect,
        /// Fill colour.
        color: Color,
    },
    /// A filled circle.
    Circle {
        /// Centre point.
        center: PxPosition,
        /// Radius.
        radius: Px,
        /// Fill colour.
        color: Color,
    },
}

impl DrawCommand {
    /// The area this command may touch.
    pub fn bounds(&self) -> PxRect {
        match *self {
            DrawCommand::Rect { rect, .. } => rect,
            DrawCommand::Circle { center, radius, .. } => PxRect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
        }
    }
}
