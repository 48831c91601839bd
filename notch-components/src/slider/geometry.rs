use notch_ui::ElementRef;

/// Pixel extent of the track in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    /// Track width, never negative.
    pub width: f64,
    /// Left edge of the track.
    pub origin_x: f64,
}

impl TrackGeometry {
    /// Creates a geometry, flooring `width` at zero.
    pub fn new(width: f64, origin_x: f64) -> Self {
        Self {
            width: width.max(0.0),
            origin_x,
        }
    }

    /// Reads the laid-out bounds of the track element.
    ///
    /// Returns `None` until the host has laid the element out.
    pub fn measure(element: &ElementRef) -> Option<Self> {
        element
            .bounding_rect()
            .map(|rect| Self::new(f64::from(rect.width.0), f64::from(rect.x.0)))
    }

    /// Offset of `pointer_x` from the track's left edge.
    pub fn offset_of(&self, pointer_x: f64) -> f64 {
        pointer_x - self.origin_x
    }

    /// Whether `offset` lies on the track, both ends included.
    pub fn contains_offset(&self, offset: f64) -> bool {
        (0.0..=self.width).contains(&offset)
    }
}

/// Maps a pixel offset on the track to a value in `[0, range]`.
///
/// `position` must lie in `[0, geometry.width]`. A zero-width track maps
/// everything to `0`. Computed in `f64`, so every `i32` value survives a trip
/// through [`value_to_pixel`].
pub fn pixel_to_value(position: f64, geometry: &TrackGeometry, range: i32) -> i32 {
    debug_assert!(range > 0, "slider range must be positive");
    if geometry.width <= 0.0 || range <= 0 {
        return 0;
    }
    let unit = geometry.width / f64::from(range);
    (position / unit).round() as i32
}

/// Maps a value in `[0, range]` to its pixel offset on the track.
pub fn value_to_pixel(value: i32, geometry: &TrackGeometry, range: i32) -> f64 {
    debug_assert!(range > 0, "slider range must be positive");
    if range <= 0 {
        return 0.0;
    }
    f64::from(value) * (geometry.width / f64::from(range))
}

#[cfg(test)]
mod tests {
    use notch_ui::{Px, PxRect};
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn measure_reads_element_bounds() {
        let element = ElementRef::new();
        assert_eq!(TrackGeometry::measure(&element), None);

        element.set_bounds(PxRect::new(Px(24.0), Px(8.0), Px(200.0), Px(16.0)));
        assert_eq!(
            TrackGeometry::measure(&element),
            Some(TrackGeometry::new(200.0, 24.0))
        );
    }

    #[test]
    fn halfway_maps_to_half_range() {
        let geometry = TrackGeometry::new(200.0, 0.0);
        assert_eq!(pixel_to_value(100.0, &geometry, 100), 50);
        assert_eq!(value_to_pixel(50, &geometry, 100), 100.0);
    }

    #[test]
    fn rounds_to_nearest_step() {
        let geometry = TrackGeometry::new(50.0, 0.0);
        assert_eq!(pixel_to_value(5.0, &geometry, 10), 1);
        assert_eq!(pixel_to_value(7.4, &geometry, 10), 1);
        assert_eq!(pixel_to_value(7.5, &geometry, 10), 2);
    }

    #[test]
    fn large_ranges_round_trip() {
        let geometry = TrackGeometry::new(200.0, 0.0);
        let cases = [
            (20_000_000, 19_999_999),
            (i32::MAX, i32::MAX - 1),
            (i32::MAX, 1),
        ];
        for (range, value) in cases {
            let pixel = value_to_pixel(value, &geometry, range);
            assert_eq!(pixel_to_value(pixel, &geometry, range), value);
        }
    }

    #[test]
    fn zero_width_maps_to_zero() {
        let geometry = TrackGeometry::new(0.0, 10.0);
        assert_eq!(pixel_to_value(0.0, &geometry, 100), 0);
        assert_eq!(value_to_pixel(80, &geometry, 100), 0.0);
    }

    #[test]
    fn negative_width_is_floored() {
        assert_eq!(TrackGeometry::new(-5.0, 3.0).width, 0.0);
    }

    #[test]
    fn track_bounds_are_inclusive() {
        let geometry = TrackGeometry::new(200.0, 40.0);
        assert_eq!(geometry.offset_of(40.0), 0.0);
        assert!(geometry.contains_offset(0.0));
        assert!(geometry.contains_offset(200.0));
        assert!(!geometry.contains_offset(-0.5));
        assert!(!geometry.contains_offset(200.5));
    }

    fn range_and_value() -> impl Strategy<Value = (i32, i32)> {
        (1i32..=i32::MAX).prop_flat_map(|range| (Just(range), 0..=range))
    }

    proptest! {
        #[test]
        fn value_survives_pixel_round_trip(
            (range, value) in range_and_value(),
            width in 1.0f64..10_000.0,
        ) {
            let geometry = TrackGeometry::new(width, 0.0);
            let pixel = value_to_pixel(value, &geometry, range);
            prop_assert_eq!(pixel_to_value(pixel, &geometry, range), value);
        }

        #[test]
        fn on_track_positions_map_into_range(
            range in 1i32..=i32::MAX,
            width in 1.0f64..10_000.0,
            fraction in 0.0f64..=1.0,
        ) {
            let geometry = TrackGeometry::new(width, 0.0);
            let position = (width * fraction).min(width);
            let value = pixel_to_value(position, &geometry, range);
            prop_assert!((0..=range).contains(&value), "{value} outside 0..={range}");
        }
    }
}
