//! Configuration type definitions.

use super::enums::ColorSpec;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the picker colors and the selected tool when a drawing is created.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Initial foreground (outline) color - either a named color (red, green, blue, yellow,
    /// orange, pink, white, black) or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_foreground")]
    pub foreground: ColorSpec,

    /// Initial background (fill) color, same format as `foreground`
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Shape created by the first drag: "line", "circle", "filled-circle" or "rectangle"
    #[serde(default = "default_shape")]
    pub default_shape: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            foreground: default_foreground(),
            background: default_background(),
            default_shape: default_shape(),
        }
    }
}

/// Canvas settings used by headless rendering.
#[derive(Debug, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_width")]
    pub width: i32,

    /// Canvas height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_height")]
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Image export settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Format used when the target path has no recognized extension: "png", "gif" or "jpg"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_foreground() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("blue".to_string())
}

fn default_shape() -> String {
    "line".to_string()
}

fn default_width() -> i32 {
    640
}

fn default_height() -> i32 {
    480
}

fn default_format() -> String {
    "png".to_string()
}
