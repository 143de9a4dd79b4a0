//! Double-buffered rasters behind the canvas.

use crate::draw::{Shape, copy_surface, render_background, render_shape};
use crate::export::{ExportError, surface_to_rgb};
use cairo::{Context, Format, ImageSurface};
use image::RgbImage;
use log::warn;

/// Raster pair driven by the canvas renderer.
///
/// The *working* buffer is what the user sees; the *committed* buffer holds
/// every finalized shape and is what the working buffer rolls back to when a
/// preview is discarded.
pub trait Backbuffer {
    /// Reallocates both buffers. Sizes are at least 1x1.
    ///
    /// On failure the previous buffers stay in place.
    fn resize(&mut self, width: i32, height: i32) -> Result<(), cairo::Error>;
    /// Fills the working buffer with the white drawing plane.
    fn clear(&mut self);
    /// Draws one shape on top of the working buffer.
    fn draw(&mut self, shape: &Shape);
    /// Copies working into committed.
    fn commit(&mut self);
    /// Copies committed into working.
    fn restore(&mut self);
}

/// Production backbuffer: two Cairo RGB image surfaces.
pub struct CairoBackbuffer {
    committed: ImageSurface,
    working: ImageSurface,
}

impl CairoBackbuffer {
    pub fn new(width: i32, height: i32) -> Result<Self, cairo::Error> {
        let (width, height) = (width.max(1), height.max(1));
        let committed = blank_surface(width, height)?;
        let working = blank_surface(width, height)?;
        Ok(Self { committed, working })
    }

    pub fn width(&self) -> i32 {
        self.working.width()
    }

    pub fn height(&self) -> i32 {
        self.working.height()
    }

    pub fn committed_surface(&self) -> &ImageSurface {
        &self.committed
    }

    /// Copies the committed frame out as an 8-bit RGB image.
    pub fn committed_image(&self) -> Result<RgbImage, ExportError> {
        surface_to_rgb(&self.committed)
    }

    /// Copies the working frame out as an 8-bit RGB image.
    pub fn working_image(&self) -> Result<RgbImage, ExportError> {
        surface_to_rgb(&self.working)
    }
}

impl Backbuffer for CairoBackbuffer {
    fn resize(&mut self, width: i32, height: i32) -> Result<(), cairo::Error> {
        *self = CairoBackbuffer::new(width, height)?;
        Ok(())
    }

    fn clear(&mut self) {
        match Context::new(&self.working) {
            Ok(ctx) => render_background(&ctx),
            Err(e) => warn!("Failed to clear working buffer: {}", e),
        }
    }

    fn draw(&mut self, shape: &Shape) {
        match Context::new(&self.working) {
            Ok(ctx) => render_shape(&ctx, shape, (0, 0)),
            Err(e) => warn!("Failed to draw {}: {}", shape.name(), e),
        }
    }

    fn commit(&mut self) {
        if let Err(e) = copy_surface(&self.working, &self.committed) {
            warn!("Failed to commit working buffer: {}", e);
        }
    }

    fn restore(&mut self) {
        if let Err(e) = copy_surface(&self.committed, &self.working) {
            warn!("Failed to restore committed buffer: {}", e);
        }
    }
}

fn blank_surface(width: i32, height: i32) -> Result<ImageSurface, cairo::Error> {
    let surface = ImageSurface::create(Format::Rgb24, width, height)?;
    {
        let ctx = Context::new(&surface)?;
        render_background(&ctx);
    }
    Ok(surface)
}
