//! Shape definitions for the drawing model.

use super::color::Color;
use crate::util::Rect;
use std::fmt;

/// Kind of shape created by interactive placement.
///
/// Selected from the toolbar; the drawing model creates a degenerate shape of
/// this kind when the user presses on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    /// Straight line between two points
    #[default]
    Line,
    /// Circle outline around a center
    Circle,
    /// Circle with an outline and a fill color
    FilledCircle,
    /// Axis-aligned rectangle outline
    Rectangle,
}

impl ShapeKind {
    /// All kinds, in toolbar order.
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Line,
        ShapeKind::Circle,
        ShapeKind::FilledCircle,
        ShapeKind::Rectangle,
    ];

    /// Parses a kind name as used in the configuration file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "line" => Some(ShapeKind::Line),
            "circle" => Some(ShapeKind::Circle),
            "filledcircle" | "fcircle" => Some(ShapeKind::FilledCircle),
            "rectangle" | "rect" => Some(ShapeKind::Rectangle),
            _ => None,
        }
    }
}

/// Which color picker a color belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    /// Outline / line color
    Foreground,
    /// Fill color (only used by filled shapes)
    Background,
}

/// A drawable geometric object.
///
/// Each variant carries its geometry, its colors and an `instance` number.
/// The instance number only feeds the human-readable label ("Circle 3"); it
/// is not serialized and is not unique across sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Straight line from `(x0, y0)` to `(x1, y1)`
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
        instance: u32,
    },
    /// Circle outline centered at `(cx, cy)`
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        outline: Color,
        instance: u32,
    },
    /// Circle outline over a solid fill
    FilledCircle {
        cx: i32,
        cy: i32,
        radius: i32,
        outline: Color,
        fill: Color,
        instance: u32,
    },
    /// Rectangle outline anchored at `(x, y)`.
    ///
    /// `w` and `h` may be negative while the user drags up or left of the
    /// anchor; rendering and bounds normalize them.
    Rectangle {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        outline: Color,
        instance: u32,
    },
}

impl Shape {
    /// Returns the kind this shape was created as.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line { .. } => ShapeKind::Line,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::FilledCircle { .. } => ShapeKind::FilledCircle,
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
        }
    }

    /// Serialization tag of this shape.
    pub fn tag(&self) -> &'static str {
        match self {
            Shape::Line { .. } => "LINE",
            Shape::Circle { .. } => "CIRCLE",
            Shape::FilledCircle { .. } => "FCIRCLE",
            Shape::Rectangle { .. } => "RECTANGLE",
        }
    }

    /// Instance number used for the label.
    pub fn instance(&self) -> u32 {
        match self {
            Shape::Line { instance, .. }
            | Shape::Circle { instance, .. }
            | Shape::FilledCircle { instance, .. }
            | Shape::Rectangle { instance, .. } => *instance,
        }
    }

    /// Human-readable label shown in the object list.
    ///
    /// Filled circles belong to the circle family and share its numbering.
    pub fn name(&self) -> String {
        let family = match self {
            Shape::Line { .. } => "Line",
            Shape::Circle { .. } | Shape::FilledCircle { .. } => "Circle",
            Shape::Rectangle { .. } => "Rectangle",
        };
        format!("{} {}", family, self.instance())
    }

    /// Outline color (line color for lines).
    pub fn foreground(&self) -> Color {
        match self {
            Shape::Line { color, .. } => *color,
            Shape::Circle { outline, .. }
            | Shape::FilledCircle { outline, .. }
            | Shape::Rectangle { outline, .. } => *outline,
        }
    }

    /// Fill color; `None` for shapes without a fill.
    pub fn background(&self) -> Option<Color> {
        match self {
            Shape::FilledCircle { fill, .. } => Some(*fill),
            _ => None,
        }
    }

    pub fn set_foreground(&mut self, new_color: Color) {
        match self {
            Shape::Line { color, .. } => *color = new_color,
            Shape::Circle { outline, .. }
            | Shape::FilledCircle { outline, .. }
            | Shape::Rectangle { outline, .. } => *outline = new_color,
        }
    }

    /// Sets the fill color. Shapes without a fill ignore this.
    pub fn set_background(&mut self, color: Color) {
        if let Shape::FilledCircle { fill, .. } = self {
            *fill = color;
        }
    }

    /// Sets the color matching the given picker.
    pub fn set_color(&mut self, source: ColorSource, color: Color) {
        match source {
            ColorSource::Foreground => self.set_foreground(color),
            ColorSource::Background => self.set_background(color),
        }
    }

    /// Moves the live endpoint while the shape is being placed.
    ///
    /// - Line: the second point follows the pointer
    /// - Circle / filled circle: the radius becomes the distance to the pointer
    /// - Rectangle: the size becomes the signed offset from the anchor
    pub fn set_endpoint(&mut self, x: i32, y: i32) {
        match self {
            Shape::Line { x1, y1, .. } => {
                *x1 = x;
                *y1 = y;
            }
            Shape::Circle { cx, cy, radius, .. } | Shape::FilledCircle { cx, cy, radius, .. } => {
                *radius = distance(*cx, *cy, x, y);
            }
            Shape::Rectangle {
                x: ax, y: ay, w, h, ..
            } => {
                *w = x.saturating_sub(*ax);
                *h = y.saturating_sub(*ay);
            }
        }
    }

    /// Translates the shape by `(dx, dy)`, clamping at the `i32` range.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        match self {
            Shape::Line { x0, y0, x1, y1, .. } => {
                *x0 = x0.saturating_add(dx);
                *y0 = y0.saturating_add(dy);
                *x1 = x1.saturating_add(dx);
                *y1 = y1.saturating_add(dy);
            }
            Shape::Circle { cx, cy, .. } | Shape::FilledCircle { cx, cy, .. } => {
                *cx = cx.saturating_add(dx);
                *cy = cy.saturating_add(dy);
            }
            Shape::Rectangle { x, y, .. } => {
                *x = x.saturating_add(dx);
                *y = y.saturating_add(dy);
            }
        }
    }

    /// Returns the axis-aligned bounding box of the geometry.
    ///
    /// The box does not include stroke width; export adds one pixel on the
    /// right and bottom edges instead.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Shape::Line { x0, y0, x1, y1, .. } => Rect::from_min_max(
                (*x0.min(x1)).into(),
                (*y0.min(y1)).into(),
                (*x0.max(x1)).into(),
                (*y0.max(y1)).into(),
            ),
            Shape::Circle { cx, cy, radius, .. } | Shape::FilledCircle { cx, cy, radius, .. } => {
                let (cx, cy, radius) = (i64::from(*cx), i64::from(*cy), i64::from(*radius));
                Rect::new(cx - radius, cy - radius, 2 * radius, 2 * radius)
            }
            Shape::Rectangle { x, y, w, h, .. } => {
                Rect::new((*x).into(), (*y).into(), (*w).into(), (*h).into())
            }
        }
    }

    /// Serializes the shape into one `.jvd` line.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Returns `true` when both shapes have the same geometry and colors,
    /// ignoring their label numbers.
    pub fn same_content(&self, other: &Shape) -> bool {
        self.serialize() == other.serialize()
    }
}

/// Writes the `.jvd` line for this shape (tag, then space-separated fields).
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())?;
        match self {
            Shape::Line { x0, y0, x1, y1, .. } => write!(f, " {x0} {y0} {x1} {y1}")?,
            Shape::Circle { cx, cy, radius, .. } | Shape::FilledCircle { cx, cy, radius, .. } => {
                write!(f, " {cx} {cy} {radius}")?
            }
            Shape::Rectangle { x, y, w, h, .. } => write!(f, " {x} {y} {w} {h}")?,
        }
        write_rgb(f, self.foreground())?;
        if let Some(fill) = self.background() {
            write_rgb(f, fill)?;
        }
        Ok(())
    }
}

fn write_rgb(f: &mut fmt::Formatter<'_>, color: Color) -> fmt::Result {
    write!(f, " {} {} {}", color.r, color.g, color.b)
}

fn distance(x0: i32, y0: i32, x1: i32, y1: i32) -> i32 {
    let dx = (i64::from(x1) - i64::from(x0)) as f64;
    let dy = (i64::from(y1) - i64::from(y0)) as f64;
    // `as` saturates, so far-away pointers clamp to `i32::MAX`.
    (dx * dx + dy * dy).sqrt() as i32
}
