//! Change notifications emitted by the drawing model.

use super::DrawingModel;

/// A change to the model's shape sequence.
///
/// Index ranges are inclusive. Listeners rely on telling single-index events
/// (`index0 == index1`) apart from ranges, so the model never merges events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    /// Shapes were inserted at `index0..=index1`.
    ///
    /// Also sent for the last index when an interactive shape is finalized.
    Added { index0: usize, index1: usize },
    /// Shapes that used to live at `index0..=index1` were removed.
    Removed { index0: usize, index1: usize },
    /// Shapes at `index0..=index1` changed in place.
    Changed { index0: usize, index1: usize },
}

impl ModelEvent {
    /// Returns the index when the event covers exactly one index.
    pub fn single_index(&self) -> Option<usize> {
        let (index0, index1) = self.range();
        (index0 == index1).then_some(index0)
    }

    /// Inclusive index range of the event.
    pub fn range(&self) -> (usize, usize) {
        match *self {
            ModelEvent::Added { index0, index1 }
            | ModelEvent::Removed { index0, index1 }
            | ModelEvent::Changed { index0, index1 } => (index0, index1),
        }
    }
}

/// Observer of a [`DrawingModel`].
///
/// Listeners are called synchronously after the model has applied the change.
/// They receive the model read-only and must not try to mutate it.
pub trait DrawingModelListener {
    fn on_model_event(&mut self, model: &DrawingModel, event: ModelEvent);
}
