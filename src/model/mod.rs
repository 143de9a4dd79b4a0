//! Drawing model: the ordered shape sequence and its change notifications.
//!
//! The model owns every shape of the open drawing (insertion order is z-order
//! and draw order), the shape currently being placed by the pointer, the
//! current picker colors and the file association. Every mutation is reported
//! to the registered [`DrawingModelListener`]s as a [`ModelEvent`].

mod events;

pub use events::{DrawingModelListener, ModelEvent};

use crate::draw::{Color, ColorSource, Shape, ShapeFactory, ShapeKind};
use log::debug;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Title used for drawings that have never been saved.
pub const UNTITLED: &str = "Untitled";

/// Reasons a property edit is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no object at index {0}")]
    OutOfBounds(usize),

    #[error("cannot edit objects while a shape is being drawn")]
    Busy,

    #[error("radius must not be negative, got {0}")]
    NegativeRadius(i32),
}

/// Ordered, observable collection of shapes.
pub struct DrawingModel {
    shapes: Vec<Shape>,
    listeners: Vec<Rc<RefCell<dyn DrawingModelListener>>>,
    factory: ShapeFactory,
    /// `true` while the last shape follows the pointer
    drawing: bool,
    changed: bool,
    file_path: Option<PathBuf>,
    foreground: Color,
    background: Color,
    selected_kind: ShapeKind,
}

impl DrawingModel {
    /// Creates an empty model with the given initial picker colors.
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            shapes: Vec::new(),
            listeners: Vec::new(),
            factory: ShapeFactory::new(),
            drawing: false,
            changed: false,
            file_path: None,
            foreground,
            background,
            selected_kind: ShapeKind::default(),
        }
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn add_listener(&mut self, listener: Rc<RefCell<dyn DrawingModelListener>>) {
        self.listeners.push(listener);
    }

    /// Unregisters a listener previously passed to [`add_listener`](Self::add_listener).
    pub fn remove_listener<L: DrawingModelListener + 'static>(&mut self, listener: &Rc<RefCell<L>>) {
        self.listeners
            .retain(|registered| !std::ptr::addr_eq(Rc::as_ptr(registered), Rc::as_ptr(listener)));
    }

    fn notify(&self, event: ModelEvent) {
        debug!("model event {:?} (size {})", event, self.shapes.len());
        for listener in &self.listeners {
            listener.borrow_mut().on_model_event(self, event);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Returns `true` while a shape is being placed interactively.
    pub fn is_currently_drawing(&self) -> bool {
        self.drawing
    }

    /// The shape being placed, if any. Always the last shape.
    pub fn drawing_shape(&self) -> Option<&Shape> {
        if self.drawing {
            self.shapes.last()
        } else {
            None
        }
    }

    /// Serializes every shape into one `.jvd` line each, in z-order.
    pub fn serialize(&self) -> Vec<String> {
        self.shapes.iter().map(Shape::serialize).collect()
    }

    // ------------------------------------------------------------------
    // Structural changes
    // ------------------------------------------------------------------

    /// Appends a shape on top of the drawing.
    ///
    /// A shape still being placed is finished first, so it never ends up
    /// below a newer shape.
    pub fn add(&mut self, shape: Shape) {
        if self.drawing {
            self.finish_drawing();
        }
        self.push(shape);
    }

    fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
        self.changed = true;
        let index = self.shapes.len() - 1;
        self.notify(ModelEvent::Added {
            index0: index,
            index1: index,
        });
    }

    /// Removes the shape at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) {
        if index >= self.shapes.len() {
            return;
        }
        if self.drawing && index == self.shapes.len() - 1 {
            self.drawing = false;
        }
        self.shapes.remove(index);
        self.changed = true;
        self.notify(ModelEvent::Removed {
            index0: index,
            index1: index,
        });
    }

    /// Removes the first shape equal to `shape`. Absent shapes are ignored.
    pub fn remove(&mut self, shape: &Shape) {
        if let Some(index) = self.shapes.iter().position(|candidate| candidate == shape) {
            self.remove_at(index);
        }
    }

    /// Removes every shape.
    ///
    /// Always notifies one removal spanning the prior extent; an empty model
    /// still reports `[0, 0]`. Clears the unsaved flag.
    pub fn clear(&mut self) {
        let end_index = self.shapes.len().saturating_sub(1);
        self.shapes.clear();
        self.drawing = false;
        self.notify(ModelEvent::Removed {
            index0: 0,
            index1: end_index,
        });
        self.changed = false;
    }

    /// Clears the drawing, forgets the file and restarts label numbering.
    pub fn reset(&mut self) {
        self.clear();
        self.file_path = None;
        self.factory.reset_instance_counters();
    }

    // ------------------------------------------------------------------
    // Interactive placement
    // ------------------------------------------------------------------

    /// Starts placing a shape of the selected kind anchored at `(x, y)`.
    ///
    /// A shape that is still being placed is finished first.
    pub fn start_drawing(&mut self, x: i32, y: i32) {
        if self.drawing {
            self.finish_drawing();
        }

        let mut shape = self.factory.create(self.selected_kind, x, y);
        shape.set_foreground(self.foreground);
        shape.set_background(self.background);
        debug!("start drawing {} at ({}, {})", shape.name(), x, y);

        // The provisional insertion must already see the drawing state.
        self.drawing = true;
        self.push(shape);
    }

    /// Moves the live endpoint of the shape being placed.
    pub fn update_drawing(&mut self, x: i32, y: i32) {
        if !self.drawing {
            return;
        }
        let Some(shape) = self.shapes.last_mut() else {
            return;
        };
        shape.set_endpoint(x, y);
        let index = self.shapes.len() - 1;
        self.notify(ModelEvent::Changed {
            index0: index,
            index1: index,
        });
    }

    /// Finalizes the shape being placed.
    ///
    /// Notifies an insertion at the last index, distinct from the provisional
    /// insertion sent by [`start_drawing`](Self::start_drawing).
    pub fn finish_drawing(&mut self) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        let Some(index) = self.shapes.len().checked_sub(1) else {
            return;
        };
        self.notify(ModelEvent::Added {
            index0: index,
            index1: index,
        });
    }

    /// Discards the shape being placed.
    pub fn cancel_drawing(&mut self) {
        if !self.drawing {
            return;
        }
        let last = self.shapes.len() - 1;
        self.remove_at(last);
    }

    /// Shape kind created by the next [`start_drawing`](Self::start_drawing).
    pub fn selected_kind(&self) -> ShapeKind {
        self.selected_kind
    }

    pub fn select_kind(&mut self, kind: ShapeKind) {
        self.selected_kind = kind;
    }

    /// Current color of the given picker.
    pub fn current_color(&self, source: ColorSource) -> Color {
        match source {
            ColorSource::Foreground => self.foreground,
            ColorSource::Background => self.background,
        }
    }

    /// Called by a color picker after the user picked `new_color`.
    ///
    /// The color becomes the picker's current color; a shape being placed
    /// takes it over immediately.
    pub fn notify_color_changed(&mut self, source: ColorSource, old_color: Color, new_color: Color) {
        debug!("{:?} color {} -> {}", source, old_color, new_color);
        match source {
            ColorSource::Foreground => self.foreground = new_color,
            ColorSource::Background => self.background = new_color,
        }

        if !self.drawing {
            return;
        }
        if let Some(shape) = self.shapes.last_mut() {
            shape.set_color(source, new_color);
            let index = self.shapes.len() - 1;
            self.notify(ModelEvent::Changed {
                index0: index,
                index1: index,
            });
        }
    }

    // ------------------------------------------------------------------
    // Property edits
    // ------------------------------------------------------------------

    /// Applies a property edit to the shape at `index`.
    ///
    /// The edit runs on a copy; the shape is replaced only if the result is
    /// valid.
    pub fn edit_object<F>(&mut self, index: usize, edit: F) -> Result<(), EditError>
    where
        F: FnOnce(&mut Shape),
    {
        if self.drawing {
            return Err(EditError::Busy);
        }
        let current = self.shapes.get(index).ok_or(EditError::OutOfBounds(index))?;

        let mut edited = current.clone();
        edit(&mut edited);
        if let Shape::Circle { radius, .. } | Shape::FilledCircle { radius, .. } = edited {
            if radius < 0 {
                return Err(EditError::NegativeRadius(radius));
            }
        }

        self.shapes[index] = edited;
        self.changed = true;
        self.notify(ModelEvent::Changed {
            index0: index,
            index1: index,
        });
        Ok(())
    }

    /// Moves the shape at `index` by `(dx, dy)`.
    pub fn translate_object(&mut self, index: usize, dx: i32, dy: i32) -> Result<(), EditError> {
        self.edit_object(index, |shape| shape.translate(dx, dy))
    }

    // ------------------------------------------------------------------
    // Document state
    // ------------------------------------------------------------------

    /// Mutable access to the shape factory, for parsing files into shapes
    /// that continue the current label numbering.
    pub fn factory_mut(&mut self) -> &mut ShapeFactory {
        &mut self.factory
    }

    pub fn factory(&self) -> &ShapeFactory {
        &self.factory
    }

    /// Returns `true` when there are unsaved changes.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_file_path(&mut self, path: Option<PathBuf>) {
        self.file_path = path;
    }

    /// Display name: the file name, or "Untitled" for unsaved drawings.
    pub fn name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }
}

impl Default for DrawingModel {
    fn default() -> Self {
        Self::new(crate::draw::RED, crate::draw::BLUE)
    }
}
