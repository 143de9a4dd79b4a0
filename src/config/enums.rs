//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// foreground = "red"
///
/// # Custom RGB color (0-255 per component)
/// background = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Unknown color names fall back to `fallback` with a warning.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using {}", name, fallback);
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::new(*r, *g, *b),
        }
    }

    /// Returns `true` if the spec resolves without falling back.
    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        let named = [RED, GREEN, BLUE, YELLOW, ORANGE, PINK, WHITE, BLACK]
            .into_iter()
            .zip([
                "red", "green", "blue", "yellow", "orange", "pink", "white", "black",
            ])
            .find(|(candidate, _)| *candidate == color);
        match named {
            Some((_, name)) => ColorSpec::Name(name.to_string()),
            None => ColorSpec::Rgb([color.r, color.g, color.b]),
        }
    }
}
