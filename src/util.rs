//! Utility functions for colors and geometry.
//!
//! This module provides:
//! - Color name lookup used by the configuration system
//! - The axis-aligned [`Rect`] used for bounding boxes and export layout
//! - Rectangle normalization for negative width/height

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle with a top-left corner and non-negative size.
///
/// Zero width or height is allowed: a degenerate line or a circle of
/// radius zero still has a well-defined position.
///
/// Coordinates are `i64` so that boxes derived from any `i32` geometry
/// (a diameter, or a line spanning the whole `i32` range) stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    /// Creates a rectangle from an anchor and a signed size.
    ///
    /// A negative width or height means the anchor is not the top-left
    /// corner; the result is normalized so that the size is non-negative.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        let (x, width) = normalize_span(x, width);
        let (y, height) = normalize_span(y, height);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self::new(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        )
    }

    /// Right edge (`x + width`).
    pub fn max_x(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (`y + height`).
    pub fn max_y(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(self, other: Rect) -> Rect {
        Rect::from_min_max(
            self.x.min(other.x),
            self.y.min(other.y),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }
}

/// Normalizes a signed span so that its length is non-negative.
///
/// Returns `(start, length)`; `(10, -4)` becomes `(6, 4)`.
pub fn normalize_span(start: i64, length: i64) -> (i64, i64) {
    if length >= 0 {
        (start, length)
    } else {
        (start.saturating_add(length), length.saturating_neg())
    }
}
