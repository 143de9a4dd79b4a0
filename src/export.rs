//! Raster export of a drawing.
//!
//! The exported image is cropped to the union of all shape bounding boxes:
//! every shape is drawn once, shifted so that the top-left corner of the
//! union lands on pixel `(0, 0)`.

use crate::draw::{Shape, copy_surface, render_background, render_shapes};
use crate::util::Rect;
use cairo::{Context, Format, ImageSurface};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use log::info;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while rasterizing or encoding an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Failed to write PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Surface data is not accessible: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Drawing is too large to export ({width}x{height})")]
    TooLarge { width: i64, height: i64 },
}

/// Supported raster formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Gif,
    Jpeg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Gif, ExportFormat::Jpeg];

    /// Parses a format name (`png`, `gif`, `jpg`/`jpeg`), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "gif" => Some(ExportFormat::Gif),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }

    /// Derives the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }

    /// Extension appended to export paths that lack one.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Gif => "gif",
            ExportFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Gif => "GIF",
            ExportFormat::Jpeg => "JPEG",
        };
        f.write_str(name)
    }
}

/// Appends the format's extension unless the path already carries it.
///
/// `drawing` becomes `drawing.png`; `drawing.PNG` and `photo.jpeg` are kept.
pub fn ensure_extension(path: &Path, format: ExportFormat) -> PathBuf {
    if ExportFormat::from_path(path) == Some(format) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Placement of the drawing inside the exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportLayout {
    /// Union of all shape bounding boxes.
    pub bounds: Rect,
    /// Translation applied to every shape (`-min_x`, `-min_y`).
    pub offset: (i64, i64),
}

impl ExportLayout {
    /// Image size in pixels. One extra pixel on each axis keeps strokes on
    /// the right and bottom edges inside the image.
    pub fn image_size(&self) -> (i64, i64) {
        (
            self.bounds.width.saturating_add(1),
            self.bounds.height.saturating_add(1),
        )
    }
}

/// Folds the bounding boxes of all shapes.
///
/// An empty drawing yields zero bounds and a 1x1 image.
pub fn layout(shapes: &[Shape]) -> ExportLayout {
    let bounds = shapes
        .iter()
        .map(Shape::bounding_box)
        .reduce(Rect::union)
        .unwrap_or_default();

    ExportLayout {
        bounds,
        offset: (bounds.x.saturating_neg(), bounds.y.saturating_neg()),
    }
}

/// Draws every shape once onto a fresh white surface sized to the layout.
pub fn render_surface(shapes: &[Shape]) -> Result<ImageSurface, ExportError> {
    let layout = layout(shapes);
    let (width, height) = layout.image_size();
    // Cairo caps image surfaces at 32767 pixels per side.
    let (Some(surface_width), Some(surface_height)) = (surface_side(width), surface_side(height))
    else {
        return Err(ExportError::TooLarge { width, height });
    };

    let surface = ImageSurface::create(Format::Rgb24, surface_width, surface_height)?;
    {
        let ctx = Context::new(&surface)?;
        render_background(&ctx);
        render_shapes(&ctx, shapes, layout.offset);
        ctx.status()?;
    }
    surface.flush();
    Ok(surface)
}

fn surface_side(pixels: i64) -> Option<i32> {
    i16::try_from(pixels).ok().map(i32::from)
}

/// Renders the drawing into an 8-bit RGB image.
pub fn render(shapes: &[Shape]) -> Result<RgbImage, ExportError> {
    surface_to_rgb(&render_surface(shapes)?)
}

/// Writes the drawing to `path` in the given format.
///
/// PNG goes through Cairo directly; GIF and JPEG are encoded by `image`.
pub fn write_image(path: &Path, format: ExportFormat, shapes: &[Shape]) -> Result<(), ExportError> {
    let surface = render_surface(shapes)?;
    match format {
        ExportFormat::Png => {
            let mut file = File::create(path)?;
            surface.write_to_png(&mut file)?;
        }
        ExportFormat::Gif => {
            let rgba = DynamicImage::ImageRgb8(surface_to_rgb(&surface)?).to_rgba8();
            rgba.save_with_format(path, ImageFormat::Gif)?;
        }
        ExportFormat::Jpeg => {
            surface_to_rgb(&surface)?.save_with_format(path, ImageFormat::Jpeg)?;
        }
    }

    info!(
        "Exported {} shapes as {} ({}x{}) to {}",
        shapes.len(),
        format,
        surface.width(),
        surface.height(),
        path.display()
    );
    Ok(())
}

/// Copies a Cairo RGB surface into an `image` buffer.
///
/// Works on a private copy so the caller's surface may stay shared.
pub fn surface_to_rgb(surface: &ImageSurface) -> Result<RgbImage, ExportError> {
    let (width, height) = (surface.width(), surface.height());
    let mut copy = ImageSurface::create(Format::Rgb24, width, height)?;
    copy_surface(surface, &copy)?;
    copy.flush();

    let stride = copy.stride() as usize;
    let data = copy.data()?;
    let mut image = RgbImage::new(width as u32, height as u32);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let offset = y as usize * stride + x as usize * 4;
        // Rgb24 pixels are native-endian 0xXXRRGGBB words.
        let word = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        *pixel = Rgb([(word >> 16) as u8, (word >> 8) as u8, word as u8]);
    }
    Ok(image)
}
