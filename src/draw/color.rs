//! RGB color type and predefined color constants.

use std::fmt;

/// An opaque RGB color with 8-bit channels.
///
/// This is the unit the `.jvd` format stores (three integers in `0..=255`)
/// and the unit color pickers report.
///
/// # Examples
///
/// ```
/// use vecdraw::draw::Color;
/// let orange = Color::new(255, 128, 0);
/// assert_eq!(orange.to_string(), "(255, 128, 0)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Creates a new color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the channels scaled to Cairo's `0.0..=1.0` range.
    pub fn to_cairo(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

/// Formats as `(r, g, b)`, the way the status bar shows colors.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color
pub const RED: Color = Color::new(255, 0, 0);

/// Predefined green color
pub const GREEN: Color = Color::new(0, 255, 0);

/// Predefined blue color
pub const BLUE: Color = Color::new(0, 0, 255);

/// Predefined yellow color
pub const YELLOW: Color = Color::new(255, 255, 0);

/// Predefined orange color
pub const ORANGE: Color = Color::new(255, 200, 0);

/// Predefined pink color
pub const PINK: Color = Color::new(255, 175, 175);

/// Canvas background color
pub const WHITE: Color = Color::new(255, 255, 255);

/// Predefined black color
pub const BLACK: Color = Color::new(0, 0, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cairo_channels_are_normalized() {
        let (r, g, b) = Color::new(255, 0, 51).to_cairo();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-9);
    }

    #[test]
    fn display_matches_status_format() {
        assert_eq!(BLUE.to_string(), "(0, 0, 255)");
    }
}
