//! Configuration file support for vecdraw.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/vecdraw/config.toml`. Settings include the initial picker colors,
//! the default shape tool, the headless canvas size and the fallback export format.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, ExportConfig};

use crate::draw::{BLUE, Color, RED, ShapeKind};
use crate::export::ExportFormat;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest canvas side accepted from the config file.
const MAX_CANVAS_SIDE: i32 = 8192;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// foreground = "red"
/// background = [0, 0, 255]
/// default_shape = "rectangle"
///
/// [canvas]
/// width = 800
/// height = 600
///
/// [export]
/// format = "png"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Picker colors and the initially selected shape
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Canvas size for headless rendering
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are replaced by the nearest valid value (or the default) and a
    /// warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    /// - `drawing.default_shape`: a known shape name
    /// - `export.format`: png, gif, jpg/jpeg
    /// - `drawing.foreground`, `drawing.background`: known color names
    fn validate_and_clamp(&mut self) {
        if !(1..=MAX_CANVAS_SIDE).contains(&self.canvas.width) {
            warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width, MAX_CANVAS_SIDE
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_CANVAS_SIDE);
        }

        if !(1..=MAX_CANVAS_SIDE).contains(&self.canvas.height) {
            warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height, MAX_CANVAS_SIDE
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_CANVAS_SIDE);
        }

        if ShapeKind::from_name(&self.drawing.default_shape).is_none() {
            warn!(
                "Invalid default_shape '{}', falling back to 'line'",
                self.drawing.default_shape
            );
            self.drawing.default_shape = "line".to_string();
        }

        if ExportFormat::from_name(&self.export.format).is_none() {
            warn!(
                "Invalid export format '{}', falling back to 'png'",
                self.export.format
            );
            self.export.format = "png".to_string();
        }

        if !self.drawing.foreground.is_valid() {
            warn!(
                "Unknown foreground color {:?}, falling back to red",
                self.drawing.foreground
            );
            self.drawing.foreground = RED.into();
        }

        if !self.drawing.background.is_valid() {
            warn!(
                "Unknown background color {:?}, falling back to blue",
                self.drawing.background
            );
            self.drawing.background = BLUE.into();
        }
    }

    /// Initial foreground picker color.
    pub fn foreground(&self) -> Color {
        self.drawing.foreground.to_color_or(RED)
    }

    /// Initial background picker color.
    pub fn background(&self) -> Color {
        self.drawing.background.to_color_or(BLUE)
    }

    /// Shape selected when a drawing is created.
    pub fn default_shape(&self) -> ShapeKind {
        ShapeKind::from_name(&self.drawing.default_shape).unwrap_or_default()
    }

    /// Format used for export paths without a recognized extension.
    pub fn export_format(&self) -> ExportFormat {
        ExportFormat::from_name(&self.export.format).unwrap_or_default()
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/vecdraw/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("vecdraw");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or if the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to `config_path`, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config directory
    /// and returns the path written.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at the target path, or if the
    /// directory or file cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&config_path, DEFAULT_CONFIG)?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }
}

/// Documented default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.example.toml");
