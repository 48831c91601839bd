//! CPU rasteriser for [`DrawCommand`]s over a softbuffer frame.

use crate::{Color, Px, PxRect, renderer::DrawCommand};

/// A mutable view of a `0RGB` pixel buffer.
pub struct Canvas<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wraps `pixels`, which must hold at least `width * height` entries.
    ///
    /// Returns `None` when the buffer is too small.
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Option<Self> {
        if pixels.len() < width.saturating_mul(height) {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
        })
    }

    /// Fills the whole frame.
    pub fn clear(&mut self, color: Color) {
        let pixel = color.to_pixel();
        let len = self.width * self.height;
        self.pixels[..len].fill(pixel);
    }

    /// Rasterises one command, clipped to the frame.
    pub fn draw(&mut self, command: &DrawCommand) {
        let Some((x0, y0, x1, y1)) = self.clip(command.bounds()) else {
            return;
        };
        match *command {
            DrawCommand::Rect { color, .. } => {
                for y in y0..y1 {
                    for x in x0..x1 {
                        self.blend(x, y, color);
                    }
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                let r2 = radius.0 * radius.0;
                for y in y0..y1 {
                    let dy = y as f32 + 0.5 - center.y.0;
                    for x in x0..x1 {
                        let dx = x as f32 + 0.5 - center.x.0;
                        if dx * dx + dy * dy <= r2 {
                            self.blend(x, y, color);
                        }
                    }
                }
            }
        }
    }

    /// Rasterises commands in order; later ones paint over earlier ones.
    pub fn draw_all<'c>(&mut self, commands: impl IntoIterator<Item = &'c DrawCommand>) {
        for command in commands {
            self.draw(command);
        }
    }

    fn blend(&mut self, x: usize, y: usize, color: Color) {
        let index = y * self.width + x;
        self.pixels[index] = color.blend_over(self.pixels[index]);
    }

    fn clip(&self, rect: PxRect) -> Option<(usize, usize, usize, usize)> {
        let frame = PxRect::new(
            Px::ZERO,
            Px::ZERO,
            Px(self.width as f32),
            Px(self.height as f32),
        );
        let visible = rect.intersection(&frame)?;
        let x0 = visible.x.0.round().max(0.0) as usize;
        let y0 = visible.y.0.round().max(0.0) as usize;
        let x1 = (visible.right().0.round() as usize).min(self.width);
        let y1 = (visible.bottom().0.round() as usize).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}
