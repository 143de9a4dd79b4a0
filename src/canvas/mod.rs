//! Incremental canvas synchronization.
//!
//! [`CanvasRenderer`] listens to the [`DrawingModel`] and keeps a
//! [`Backbuffer`] in step with it. Finalized shapes live in the committed
//! buffer; the shape under the pointer is previewed on the working buffer
//! only, so each pointer move costs one restore and one shape draw instead of
//! a full repaint.

mod backbuffer;

pub use backbuffer::{Backbuffer, CairoBackbuffer};

use crate::model::{DrawingModel, DrawingModelListener, ModelEvent};
use log::debug;

/// Renderer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Working and committed buffers hold the same frame.
    Idle,
    /// The working buffer additionally shows the shape being placed.
    Previewing,
}

/// Keeps a backbuffer synchronized with a drawing model.
pub struct CanvasRenderer<B: Backbuffer> {
    backbuffer: B,
    state: RenderState,
}

impl<B: Backbuffer> CanvasRenderer<B> {
    pub fn new(backbuffer: B) -> Self {
        Self {
            backbuffer,
            state: RenderState::Idle,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn backbuffer(&self) -> &B {
        &self.backbuffer
    }

    /// Reallocates both buffers for a new canvas size and repaints.
    ///
    /// If the buffers cannot be reallocated the canvas keeps its old size and
    /// contents.
    pub fn resize(
        &mut self,
        model: &DrawingModel,
        width: i32,
        height: i32,
    ) -> Result<(), cairo::Error> {
        let (width, height) = (width.max(1), height.max(1));
        self.backbuffer.resize(width, height)?;
        debug!("canvas resized to {}x{}", width, height);
        self.full_redraw(model);
        Ok(())
    }

    /// Repaints everything from the model.
    pub fn full_redraw(&mut self, model: &DrawingModel) {
        self.backbuffer.clear();

        let Some((last, below)) = model.shapes().split_last() else {
            self.backbuffer.commit();
            self.set_state(RenderState::Idle);
            return;
        };

        for shape in below {
            self.backbuffer.draw(shape);
        }

        if model.is_currently_drawing() {
            // The last shape is still moving; keep it out of the committed frame.
            self.backbuffer.commit();
            self.backbuffer.draw(last);
            self.set_state(RenderState::Previewing);
        } else {
            self.backbuffer.draw(last);
            self.backbuffer.commit();
            self.set_state(RenderState::Idle);
        }
    }

    fn shape_added(&mut self, model: &DrawingModel, index: usize) {
        let Some(shape) = model.get(index) else {
            return;
        };

        match (self.state, model.is_currently_drawing()) {
            // Finalization: the working buffer already shows the shape.
            (RenderState::Previewing, false) => {
                self.backbuffer.commit();
                self.set_state(RenderState::Idle);
            }
            // Provisional insertion of a shape about to be dragged.
            (RenderState::Idle, true) => {
                self.backbuffer.commit();
                self.backbuffer.draw(shape);
                self.set_state(RenderState::Previewing);
            }
            (RenderState::Previewing, true) => {
                self.backbuffer.draw(shape);
            }
            (RenderState::Idle, false) => {
                self.backbuffer.draw(shape);
                self.backbuffer.commit();
            }
        }
    }

    fn set_state(&mut self, state: RenderState) {
        if self.state != state {
            debug!("canvas {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

impl<B: Backbuffer> DrawingModelListener for CanvasRenderer<B> {
    fn on_model_event(&mut self, model: &DrawingModel, event: ModelEvent) {
        let last = model.len().checked_sub(1);
        let previewing = self.state == RenderState::Previewing;

        match (event, event.single_index()) {
            (ModelEvent::Added { .. }, Some(index)) if Some(index) == last => {
                self.shape_added(model, index);
            }
            // The previewed shape was discarded: roll back to the committed frame.
            (ModelEvent::Removed { .. }, Some(index)) if previewing && index == model.len() => {
                self.backbuffer.restore();
                let state = if model.is_currently_drawing() {
                    RenderState::Previewing
                } else {
                    RenderState::Idle
                };
                self.set_state(state);
            }
            (ModelEvent::Changed { .. }, Some(index)) if previewing && Some(index) == last => {
                if let Some(shape) = model.get(index) {
                    self.backbuffer.restore();
                    self.backbuffer.draw(shape);
                }
            }
            _ => self.full_redraw(model),
        }
    }
}
