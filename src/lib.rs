//! Vector drawing editor core.
//!
//! Shapes live in a [`model::DrawingModel`]; every change is broadcast to
//! listeners such as the incremental [`canvas::CanvasRenderer`] and the
//! [`ui::ObjectList`]. Drawings are stored as `.jvd` text files
//! ([`document`]) and can be exported as PNG, GIF or JPEG ([`export`]).

pub mod canvas;
pub mod config;
pub mod document;
pub mod draw;
pub mod export;
pub mod model;
pub mod ui;
pub mod util;

pub use config::Config;
