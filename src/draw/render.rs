//! Cairo-based rendering functions for shapes.

use super::color::{Color, WHITE};
use super::shape::Shape;
use crate::util::normalize_span;

/// Stroke width used for every outline, in pixels.
pub const STROKE_WIDTH: f64 = 1.0;

/// Fills the whole target with the white drawing plane.
pub fn render_background(ctx: &cairo::Context) {
    let (r, g, b) = WHITE.to_cairo();
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgb(r, g, b);
    let _ = ctx.paint(); // An in-memory paint only fails once the context is in an error state
    let _ = ctx.restore();
}

/// Replaces the pixels of `dst` with those of `src`.
pub fn copy_surface(src: &cairo::ImageSurface, dst: &cairo::ImageSurface) -> Result<(), cairo::Error> {
    let ctx = cairo::Context::new(dst)?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_surface(src, 0.0, 0.0)?;
    ctx.paint()
}

/// Renders all shapes in order (first shape = bottom layer).
///
/// `offset` is added to every coordinate; export uses it to crop the drawing
/// to its bounding box.
pub fn render_shapes(ctx: &cairo::Context, shapes: &[Shape], offset: (i64, i64)) {
    for shape in shapes {
        render_shape(ctx, shape, offset);
    }
}

/// Renders a single shape with anti-aliased strokes.
///
/// Filled shapes paint their fill first so the outline stays visible.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape, offset: (i64, i64)) {
    let _ = ctx.save();
    ctx.set_antialias(cairo::Antialias::Best);
    ctx.translate(offset.0 as f64, offset.1 as f64);

    match shape {
        Shape::Line {
            x0,
            y0,
            x1,
            y1,
            color,
            ..
        } => render_line(ctx, *x0, *y0, *x1, *y1, *color),
        Shape::Circle {
            cx,
            cy,
            radius,
            outline,
            ..
        } => render_circle(ctx, *cx, *cy, *radius, *outline, None),
        Shape::FilledCircle {
            cx,
            cy,
            radius,
            outline,
            fill,
            ..
        } => render_circle(ctx, *cx, *cy, *radius, *outline, Some(*fill)),
        Shape::Rectangle {
            x,
            y,
            w,
            h,
            outline,
            ..
        } => render_rect(ctx, *x, *y, *w, *h, *outline),
    }

    let _ = ctx.restore();
}

fn set_color(ctx: &cairo::Context, color: Color) {
    let (r, g, b) = color.to_cairo();
    ctx.set_source_rgb(r, g, b);
}

/// Render a straight line
fn render_line(ctx: &cairo::Context, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    set_color(ctx, color);
    ctx.set_line_width(STROKE_WIDTH);
    ctx.set_line_cap(cairo::LineCap::Square);

    ctx.move_to(x0 as f64 + 0.5, y0 as f64 + 0.5);
    ctx.line_to(x1 as f64 + 0.5, y1 as f64 + 0.5);
    let _ = ctx.stroke();
}

/// Render a circle outline, optionally over a fill
fn render_circle(
    ctx: &cairo::Context,
    cx: i32,
    cy: i32,
    radius: i32,
    outline: Color,
    fill: Option<Color>,
) {
    if radius <= 0 {
        return;
    }

    let (cx, cy, radius) = (cx as f64 + 0.5, cy as f64 + 0.5, radius as f64);

    if let Some(fill) = fill {
        set_color(ctx, fill);
        ctx.new_path();
        ctx.arc(cx, cy, radius, 0.0, 2.0 * std::f64::consts::PI);
        let _ = ctx.fill();
    }

    set_color(ctx, outline);
    ctx.set_line_width(STROKE_WIDTH);
    ctx.new_path();
    ctx.arc(cx, cy, radius, 0.0, 2.0 * std::f64::consts::PI);
    let _ = ctx.stroke();
}

/// Render a rectangle outline
fn render_rect(ctx: &cairo::Context, x: i32, y: i32, w: i32, h: i32, color: Color) {
    set_color(ctx, color);
    ctx.set_line_width(STROKE_WIDTH);
    ctx.set_line_join(cairo::LineJoin::Miter);

    // Drag direction decides the sign of w/h; draw from the true top-left.
    let (x, w) = normalize_span(x.into(), w.into());
    let (y, h) = normalize_span(y.into(), h.into());

    ctx.rectangle(x as f64 + 0.5, y as f64 + 0.5, w as f64, h as f64);
    let _ = ctx.stroke();
}
