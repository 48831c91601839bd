//! Physical pixel coordinates for the notch viewport.
//!
//! Everything the runtime hands to a control is expressed in physical pixels
//! relative to the top-left corner of the window's client area:
//! - X grows to the right
//! - Y grows downward
//! - Negative values are legal and mean "left of / above the viewport"
//!
//! Pointer coordinates reported by the windowing system are fractional, so
//! [`Px`] wraps an `f32` rather than an integer. Rasterisation rounds at the
//! last moment.
//!
//! # Example
//!
//! ```
//! use notch_ui::px::{Px, PxPosition, PxRect};
//!
//! let track = PxRect::new(Px(20.0), Px(40.0), Px(200.0), Px(4.0));
//! let pointer = PxPosition::new(Px(120.0), Px(41.0));
//! assert!(track.contains(pointer));
//! assert_eq!(pointer.x - track.x, Px(100.0));
//! ```

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A physical pixel length or coordinate.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Px(pub f32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Px` from a raw value.
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Rounds to the nearest whole pixel, saturating at the `i32` bounds.
    ///
    /// ```
    /// use notch_ui::px::Px;
    ///
    /// assert_eq!(Px(10.5).round_i32(), 11);
    /// assert_eq!(Px(f32::MAX).round_i32(), i32::MAX);
    /// ```
    pub fn round_i32(self) -> i32 {
        self.0.round() as i32
    }

    /// Clamps into `[min, max]`.
    pub fn clamp(self, min: Px, max: Px) -> Self {
        Self(self.0.clamp(min.0, max.0))
    }

    /// Returns the larger of two values.
    pub fn max(self, other: Px) -> Self {
        Self(self.0.max(other.0))
    }

    /// Returns the smaller of two values.
    pub fn min(self, other: Px) -> Self {
        Self(self.0.min(other.0))
    }
}

impl From<f32> for Px {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Self(value as f32)
    }
}

impl From<u32> for Px {
    fn from(value: u32) -> Self {
        Self(value as f32)
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f32> for Px {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<f32> for Px {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self(self.0 / rhs)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A point in viewport space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PxPosition {
    /// Horizontal coordinate.
    pub x: Px,
    /// Vertical coordinate.
    pub y: Px,
}

impl PxPosition {
    /// The viewport origin.
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
    };

    /// Creates a position from its coordinates.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// Returns this position moved by `(dx, dy)`.
    pub fn offset(self, dx: Px, dy: Px) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Converts a `[x, y]` pair reported by winit.
    pub fn from_f64_arr2(arr: [f64; 2]) -> Self {
        Self {
            x: Px(arr[0] as f32),
            y: Px(arr[1] as f32),
        }
    }
}

impl From<winit::dpi::PhysicalPosition<f64>> for PxPosition {
    fn from(position: winit::dpi::PhysicalPosition<f64>) -> Self {
        Self::from_f64_arr2([position.x, position.y])
    }
}

impl Add for PxPosition {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for PxPosition {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A width/height pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PxSize {
    /// Horizontal extent.
    pub width: Px,
    /// Vertical extent.
    pub height: Px,
}

impl PxSize {
    /// An empty size.
    pub const ZERO: Self = Self {
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a size from its extents.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either extent is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width.0 <= 0.0 || self.height.0 <= 0.0
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for PxSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self {
            width: Px::from(size.width),
            height: Px::from(size.height),
        }
    }
}

/// An axis-aligned rectangle; `(x, y)` is its top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PxRect {
    /// Left edge.
    pub x: Px,
    /// Top edge.
    pub y: Px,
    /// Horizontal extent.
    pub width: Px,
    /// Vertical extent.
    pub height: Px,
}

impl PxRect {
    /// An empty rectangle at the origin.
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a rectangle from its top-left corner and extents.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of `size` centred on `center`.
    pub fn centered_at(center: PxPosition, size: PxSize) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> Px {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> Px {
        self.y + self.height
    }

    /// Centre point.
    pub fn center(&self) -> PxPosition {
        PxPosition::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `point` lies inside; the left and top edges are inclusive, the
    /// right and bottom edges exclusive.
    pub fn contains(&self, point: PxPosition) -> bool {
        point.x.0 >= self.x.0
            && point.x.0 < self.right().0
            && point.y.0 >= self.y.0
            && point.y.0 < self.bottom().0
    }

    /// Overlap of two rectangles, or `None` when they do not intersect.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right.0 <= left.0 || bottom.0 <= top.0 {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }
}
