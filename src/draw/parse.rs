//! Shape registry: `.jvd` line parsing and shape creation.
//!
//! Every shape is created through a [`ShapeFactory`], which owns the per-family
//! instance counters that number the labels ("Line 1", "Circle 2", ...).

use super::color::{BLACK, Color, WHITE};
use super::shape::{Shape, ShapeKind};
use thiserror::Error;

/// Errors produced when a `.jvd` line cannot be turned into a shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty line")]
    Empty,

    #[error("cannot determine object type from '{0}'")]
    UnknownTag(String),

    #[error("{tag} must contain {expected} fields, found {found}")]
    FieldCount {
        tag: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("field {position} is not an integer: '{text}'")]
    InvalidNumber { position: usize, text: String },

    #[error("field {position} is not a color channel (0-255): {value}")]
    ColorChannel { position: usize, value: i32 },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<FormatError>,
    },
}

/// Field layout of one tag, used to validate arity before parsing.
struct TagSpec {
    tag: &'static str,
    fields: usize,
}

const LINE: TagSpec = TagSpec {
    tag: "LINE",
    fields: 7,
};
const CIRCLE: TagSpec = TagSpec {
    tag: "CIRCLE",
    fields: 6,
};
const FCIRCLE: TagSpec = TagSpec {
    tag: "FCIRCLE",
    fields: 9,
};
const RECTANGLE: TagSpec = TagSpec {
    tag: "RECTANGLE",
    fields: 7,
};

/// Per-family monotonic counters used for shape labels.
///
/// Filled circles share the circle counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceCounters {
    pub line: u32,
    pub circle: u32,
    pub rectangle: u32,
}

impl InstanceCounters {
    fn next(&mut self, kind: ShapeKind) -> u32 {
        let counter = match kind {
            ShapeKind::Line => &mut self.line,
            ShapeKind::Circle | ShapeKind::FilledCircle => &mut self.circle,
            ShapeKind::Rectangle => &mut self.rectangle,
        };
        *counter += 1;
        *counter
    }
}

/// Creates shapes, either interactively or from serialized lines.
#[derive(Debug, Clone, Default)]
pub struct ShapeFactory {
    counters: InstanceCounters,
}

impl ShapeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter values.
    pub fn counters(&self) -> InstanceCounters {
        self.counters
    }

    /// Zeroes all counters. Only a full workspace reset calls this; loading
    /// a file keeps counting from the current values.
    pub fn reset_instance_counters(&mut self) {
        self.counters = InstanceCounters::default();
    }

    /// Creates the degenerate initial form of a shape anchored at `(x, y)`.
    ///
    /// Colors are placeholders; the caller assigns the current picker colors.
    pub fn create(&mut self, kind: ShapeKind, x: i32, y: i32) -> Shape {
        let instance = self.counters.next(kind);
        match kind {
            ShapeKind::Line => Shape::Line {
                x0: x,
                y0: y,
                x1: x,
                y1: y,
                color: BLACK,
                instance,
            },
            ShapeKind::Circle => Shape::Circle {
                cx: x,
                cy: y,
                radius: 0,
                outline: BLACK,
                instance,
            },
            ShapeKind::FilledCircle => Shape::FilledCircle {
                cx: x,
                cy: y,
                radius: 0,
                outline: BLACK,
                fill: WHITE,
                instance,
            },
            ShapeKind::Rectangle => Shape::Rectangle {
                x,
                y,
                w: 0,
                h: 0,
                outline: BLACK,
                instance,
            },
        }
    }

    /// Parses one `.jvd` line.
    ///
    /// Runs of whitespace are collapsed, so `"  CIRCLE 1\t2 3  0 0 0 "` is
    /// accepted. The counter of the shape's family is advanced only on
    /// success, and by exactly one.
    pub fn parse(&mut self, line: &str) -> Result<Shape, FormatError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (&tag, fields) = tokens.split_first().ok_or(FormatError::Empty)?;

        let shape = match tag {
            "LINE" => {
                let values = parse_fields(&LINE, fields)?;
                Shape::Line {
                    x0: values[0],
                    y0: values[1],
                    x1: values[2],
                    y1: values[3],
                    color: color_at(&values, 4)?,
                    instance: self.counters.next(ShapeKind::Line),
                }
            }
            "CIRCLE" => {
                let values = parse_fields(&CIRCLE, fields)?;
                let (cx, cy, radius, outline) = circle_fields(&values)?;
                Shape::Circle {
                    cx,
                    cy,
                    radius,
                    outline,
                    instance: self.counters.next(ShapeKind::Circle),
                }
            }
            "FCIRCLE" => {
                let values = parse_fields(&FCIRCLE, fields)?;
                let (cx, cy, radius, outline) = circle_fields(&values)?;
                Shape::FilledCircle {
                    cx,
                    cy,
                    radius,
                    outline,
                    fill: color_at(&values, 6)?,
                    instance: self.counters.next(ShapeKind::FilledCircle),
                }
            }
            "RECTANGLE" => {
                let values = parse_fields(&RECTANGLE, fields)?;
                Shape::Rectangle {
                    x: values[0],
                    y: values[1],
                    w: values[2],
                    h: values[3],
                    outline: color_at(&values, 4)?,
                    instance: self.counters.next(ShapeKind::Rectangle),
                }
            }
            other => return Err(FormatError::UnknownTag(other.to_string())),
        };

        Ok(shape)
    }

    /// Parses a whole document. Blank lines are skipped.
    ///
    /// Either every line parses or nothing is returned; the error names the
    /// 1-based line number.
    pub fn parse_lines<I, S>(&mut self, lines: I) -> Result<Vec<Shape>, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut shapes = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let shape = self.parse(line).map_err(|source| FormatError::AtLine {
                line: index + 1,
                source: Box::new(source),
            })?;
            shapes.push(shape);
        }
        Ok(shapes)
    }
}

fn parse_fields(spec: &TagSpec, fields: &[&str]) -> Result<Vec<i32>, FormatError> {
    if fields.len() != spec.fields {
        return Err(FormatError::FieldCount {
            tag: spec.tag,
            expected: spec.fields,
            found: fields.len(),
        });
    }

    fields
        .iter()
        .enumerate()
        .map(|(index, text)| {
            text.parse::<i32>().map_err(|_| FormatError::InvalidNumber {
                position: index + 1,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Shared CIRCLE layout: `x y radius r g b`. FCIRCLE reuses it for its
/// first six fields.
fn circle_fields(values: &[i32]) -> Result<(i32, i32, i32, Color), FormatError> {
    Ok((values[0], values[1], values[2], color_at(values, 3)?))
}

fn color_at(values: &[i32], start: usize) -> Result<Color, FormatError> {
    let channel = |offset: usize| {
        let value = values[start + offset];
        u8::try_from(value).map_err(|_| FormatError::ColorChannel {
            position: start + offset + 1,
            value,
        })
    };
    Ok(Color::new(channel(0)?, channel(1)?, channel(2)?))
}
