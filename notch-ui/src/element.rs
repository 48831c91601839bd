//! Handles to laid-out elements.
//!
//! The host's layout pass writes each element's bounding rect into its
//! [`ElementRef`]; controls read it back when they need to measure
//! themselves. An element that has not been laid out yet has no bounds.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::PxRect;

/// Shared handle to one element's bounding rect in viewport coordinates.
#[derive(Clone, Default)]
pub struct ElementRef {
    bounds: Arc<RwLock<Option<PxRect>>>,
}

impl ElementRef {
    /// Creates a handle for an element that has not been laid out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the element's laid-out bounds.
    pub fn set_bounds(&self, rect: PxRect) {
        *self.bounds.write() = Some(rect);
    }

    /// Marks the element as not present.
    pub fn clear(&self) {
        *self.bounds.write() = None;
    }

    /// The element's current bounding rect, if it has been laid out.
    pub fn bounding_rect(&self) -> Option<PxRect> {
        *self.bounds.read()
    }

    /// Whether a layout pass has placed this element.
    pub fn is_laid_out(&self) -> bool {
        self.bounds.read().is_some()
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bounds, &other.bounds)
    }
}

impl std::fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ElementRef")
            .field(&self.bounding_rect())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Px;

    #[test]
    fn clones_share_bounds() {
        let element = ElementRef::new();
        let alias = element.clone();
        assert!(!alias.is_laid_out());

        let rect = PxRect::new(Px(1.0), Px(2.0), Px(3.0), Px(4.0));
        element.set_bounds(rect);
        assert_eq!(alias.bounding_rect(), Some(rect));
        assert_eq!(element, alias);
        assert_ne!(element, ElementRef::new());

        alias.clear();
        assert_eq!(element.bounding_rect(), None);
    }
}
