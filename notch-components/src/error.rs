//! Errors raised by notch components.

use thiserror::Error;

/// Rejected slider configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SliderError {
    /// The range must be at least 1.
    #[error("slider range must be at least 1, got {0}")]
    InvalidRange(i32),
    /// The initial value lies outside `[0, range]`.
    #[error("slider value {value} is outside 0..={range}")]
    ValueOutOfRange {
        /// The offending value.
        value: i32,
        /// The configured range.
        range: i32,
    },
}
