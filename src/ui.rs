//! Text shown around the canvas: object list, status bar and window title.

use crate::draw::Color;
use crate::model::{DrawingModel, DrawingModelListener, ModelEvent};
use log::debug;

/// Application name shown in window titles.
pub const APP_NAME: &str = "vecdraw";

/// Status bar text for the two picker colors.
///
/// Example: `Foreground color: (255, 0, 0), background color: (0, 0, 255)`.
pub fn status_text(foreground: Color, background: Color) -> String {
    format!(
        "Foreground color: {}, background color: {}",
        foreground, background
    )
}

/// Window title: the drawing name, with a leading `*` while unsaved.
pub fn window_title(model: &DrawingModel) -> String {
    let marker = if model.is_changed() { "*" } else { "" };
    format!("{}{} - {}", marker, model.name(), APP_NAME)
}

/// Question asked before unsaved changes would be discarded, if any.
pub fn unsaved_changes_prompt(model: &DrawingModel) -> Option<String> {
    model
        .is_changed()
        .then(|| format!("Do you want to save changes to {}?", model.name()))
}

/// Label list mirroring the model, one entry per shape in z-order.
#[derive(Debug, Default)]
pub struct ObjectList {
    labels: Vec<String>,
}

impl ObjectList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the list from the current model contents.
    pub fn from_model(model: &DrawingModel) -> Self {
        let mut list = Self::new();
        list.resync(model);
        list
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn resync(&mut self, model: &DrawingModel) {
        self.labels = model.shapes().iter().map(|shape| shape.name()).collect();
    }

    fn relabel(&mut self, model: &DrawingModel, index0: usize, index1: usize) {
        for index in index0..=index1 {
            if let (Some(label), Some(shape)) = (self.labels.get_mut(index), model.get(index)) {
                *label = shape.name();
            }
        }
    }
}

impl DrawingModelListener for ObjectList {
    fn on_model_event(&mut self, model: &DrawingModel, event: ModelEvent) {
        let (index0, index1) = event.range();
        match event {
            // Finalization re-announces a shape that is already listed.
            ModelEvent::Added { .. } if self.labels.len() == model.len() => {
                self.relabel(model, index0, index1);
            }
            ModelEvent::Added { .. } => {
                for index in index0..=index1 {
                    match model.get(index) {
                        Some(shape) if index <= self.labels.len() => {
                            self.labels.insert(index, shape.name());
                        }
                        _ => break,
                    }
                }
            }
            ModelEvent::Removed { .. } => {
                if index0 < self.labels.len() {
                    let end = index1.min(self.labels.len() - 1);
                    self.labels.drain(index0..=end);
                }
            }
            ModelEvent::Changed { .. } => self.relabel(model, index0, index1),
        }

        if self.labels.len() != model.len() {
            debug!(
                "object list out of step ({} labels, {} shapes), resyncing",
                self.labels.len(),
                model.len()
            );
            self.resync(model);
        }
    }
}
