//! RGBA colours and their packing into softbuffer pixels.

use serde::{Deserialize, Serialize};

/// A color in the sRGB color space with an alpha component.
///
/// Values are stored as `f32`s, typically in the range `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new `Color` from four `f32` values (red, green, blue, alpha).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Color` from three `f32` values (red, green, blue).
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a new opaque `Color` from three `u8` values (red, green, blue).
    #[inline]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Packs into the `0RGB` layout softbuffer expects. Alpha is dropped.
    pub fn to_pixel(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Composites this colour over an existing `0RGB` pixel.
    pub fn blend_over(self, dst: u32) -> u32 {
        let alpha = self.a.clamp(0.0, 1.0);
        if alpha >= 1.0 {
            return self.to_pixel();
        }
        if alpha <= 0.0 {
            return dst;
        }
        let unpack = |shift: u32| ((dst >> shift) & 0xff) as f32 / 255.0;
        let mix = |src: f32, dst: f32| src * alpha + dst * (1.0 - alpha);
        Color::from_rgb(
            mix(self.r, unpack(16)),
            mix(self.g, unpack(8)),
            mix(self.b, unpack(0)),
        )
        .to_pixel()
    }
}

/// The default color is fully transparent.
impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_to_0rgb() {
        assert_eq!(Color::WHITE.to_pixel(), 0x00ff_ffff);
        assert_eq!(Color::from_rgb_u8(0x12, 0x34, 0x56).to_pixel(), 0x0012_3456);
    }

    #[test]
    fn blend_respects_alpha() {
        let half_white = Color::new(1.0, 1.0, 1.0, 0.5);
        assert_eq!(half_white.blend_over(0x0000_0000), 0x0080_8080);
        assert_eq!(Color::TRANSPARENT.blend_over(0x0012_3456), 0x0012_3456);
        assert_eq!(Color::BLACK.blend_over(0x00ff_ffff), 0);
    }
}
