//! ViewportGeometry: visibility test for section rectangles.
//!
//! Coordinates are viewport-relative, as returned by `getBoundingClientRect()`.
//! Only the vertical axis takes part in the test.

use serde::{Deserialize, Serialize};

/// Viewport-relative bounding box of an element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Rect {
    /// Rect spanning the vertical range `[top, bottom]` with zero width
    pub fn vertical(top: f64, bottom: f64) -> Self {
        Self {
            top,
            bottom,
            left: 0.0,
            right: 0.0,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Size of the visible region of the document
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Lower bound applied to a rect's `top` edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tolerance {
    pub top_min: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::strict()
    }
}

impl Tolerance {
    /// Section must start at or below the viewport's top edge
    pub fn strict() -> Self {
        Self { top_min: 0.0 }
    }

    /// Section may have scrolled up to 30px past the top edge
    pub fn lenient() -> Self {
        Self { top_min: -30.0 }
    }
}

/// True when the rect counts as the visible section.
///
/// `top` must lie in `[tolerance.top_min, viewport.height)` and `bottom`
/// must not be above the viewport.
pub fn is_visible(rect: &Rect, viewport: &Viewport, tolerance: &Tolerance) -> bool {
    rect.top >= tolerance.top_min && rect.bottom >= 0.0 && rect.top < viewport.height
}
