//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: 8-bit RGB color with predefined constants
//! - [`Shape`]: the closed set of drawable objects
//! - [`ShapeFactory`]: `.jvd` parsing and labelled shape creation
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod parse;
pub mod render;
pub mod shape;

// Re-export commonly used types at module level
pub use color::Color;
pub use parse::{FormatError, InstanceCounters, ShapeFactory};
pub use render::{copy_surface, render_background, render_shape, render_shapes};
pub use shape::{ColorSource, Shape, ShapeKind};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
