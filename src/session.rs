//! Editing view state and the session that drives the engine from it.
//!
//! The state is a sum type; every user action is a method that matches on it
//! exhaustively and either performs the transition or reports an
//! [`SessionError::IllegalTransition`] without touching anything.

use std::sync::Arc;

use log::{info, warn};

use crate::engine::{MaskEngine, StrokeMode};
use crate::error::SessionError;
use crate::types::{FrameBuffer, MaskBitmap, Point};

#[derive(Clone, Debug, Default)]
pub enum EditingState {
    /// No source image yet.
    #[default]
    Initial,
    /// A source image request is in flight.
    Loading,
    /// A source image is shown and can be masked.
    ImageGenerated { source: Arc<FrameBuffer> },
    /// A mask was produced; drawing is locked until cancel or reselect.
    ImageMasked {
        source: Arc<FrameBuffer>,
        mask: Arc<MaskBitmap>,
    },
    /// The last request failed; a new request may be made.
    Error { message: String },
}

impl EditingState {
    pub fn name(&self) -> &'static str {
        match self {
            EditingState::Initial => "initial",
            EditingState::Loading => "loading",
            EditingState::ImageGenerated { .. } => "image generated",
            EditingState::ImageMasked { .. } => "image masked",
            EditingState::Error { .. } => "error",
        }
    }

    /// The image currently on screen, if any.
    pub fn source(&self) -> Option<&Arc<FrameBuffer>> {
        match self {
            EditingState::ImageGenerated { source } | EditingState::ImageMasked { source, .. } => {
                Some(source)
            }
            EditingState::Initial | EditingState::Loading | EditingState::Error { .. } => None,
        }
    }

    pub fn mask(&self) -> Option<&Arc<MaskBitmap>> {
        match self {
            EditingState::ImageMasked { mask, .. } => Some(mask),
            _ => None,
        }
    }

    pub fn can_draw(&self) -> bool {
        matches!(self, EditingState::ImageGenerated { .. })
    }
}

/// One editing session: the view state plus the engine it gates.
#[derive(Debug, Default)]
pub struct EditingSession {
    state: EditingState,
    engine: MaskEngine,
}

impl EditingSession {
    pub fn new(mode: StrokeMode) -> Self {
        Self { state: EditingState::Initial, engine: MaskEngine::with_mode(mode) }
    }

    pub fn state(&self) -> &EditingState {
        &self.state
    }

    pub fn engine(&self) -> &MaskEngine {
        &self.engine
    }

    fn illegal(&self, action: &'static str) -> SessionError {
        warn!("rejected {action} in state {}", self.state.name());
        SessionError::IllegalTransition { from: self.state.name(), action }
    }

    fn enter(&mut self, next: EditingState) {
        info!("editing state: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    /// Ask for a new source image.
    pub fn request_image(&mut self) -> Result<(), SessionError> {
        match self.state {
            EditingState::Loading => Err(self.illegal("request an image")),
            EditingState::Initial
            | EditingState::Error { .. }
            | EditingState::ImageGenerated { .. }
            | EditingState::ImageMasked { .. } => {
                self.engine.clear();
                self.enter(EditingState::Loading);
                Ok(())
            }
        }
    }

    pub fn image_ready(&mut self, source: Arc<FrameBuffer>) -> Result<(), SessionError> {
        match self.state {
            EditingState::Loading => {
                self.enter(EditingState::ImageGenerated { source });
                Ok(())
            }
            EditingState::Initial
            | EditingState::Error { .. }
            | EditingState::ImageGenerated { .. }
            | EditingState::ImageMasked { .. } => Err(self.illegal("accept an image")),
        }
    }

    pub fn image_failed(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        match self.state {
            EditingState::Loading => {
                self.engine.clear();
                self.enter(EditingState::Error { message: message.into() });
                Ok(())
            }
            EditingState::Initial
            | EditingState::Error { .. }
            | EditingState::ImageGenerated { .. }
            | EditingState::ImageMasked { .. } => Err(self.illegal("report a failure")),
        }
    }

    pub fn begin_stroke(&mut self, point: impl Into<Point>) -> Result<(), SessionError> {
        if !self.state.can_draw() {
            return Err(self.illegal("draw"));
        }
        self.engine.begin_stroke(point);
        Ok(())
    }

    pub fn extend_stroke(&mut self, point: impl Into<Point>) -> Result<(), SessionError> {
        if !self.state.can_draw() {
            return Err(self.illegal("draw"));
        }
        self.engine.extend_stroke(point);
        Ok(())
    }

    /// Turn the drawn path into a mask sized to the source image.
    pub fn finalize_mask(&mut self) -> Result<Arc<MaskBitmap>, SessionError> {
        let source = match &self.state {
            EditingState::ImageGenerated { source } => Arc::clone(source),
            EditingState::Initial
            | EditingState::Loading
            | EditingState::ImageMasked { .. }
            | EditingState::Error { .. } => return Err(self.illegal("finalize a mask")),
        };
        let (w, h) = source.dimensions_i32();
        let mask = Arc::new(self.engine.finalize(w, h)?);
        self.enter(EditingState::ImageMasked { source, mask: Arc::clone(&mask) });
        Ok(mask)
    }

    /// Install a mask rasterized elsewhere (see [`crate::worker`]).
    /// The mask must match the source dimensions.
    pub fn accept_mask(&mut self, mask: MaskBitmap) -> Result<Arc<MaskBitmap>, SessionError> {
        let source = match &self.state {
            EditingState::ImageGenerated { source }
                if (mask.width() as usize, mask.height() as usize)
                    == (source.width, source.height) =>
            {
                Arc::clone(source)
            }
            _ => return Err(self.illegal("accept a mask")),
        };
        self.engine.clear();
        let mask = Arc::new(mask);
        self.enter(EditingState::ImageMasked { source, mask: Arc::clone(&mask) });
        Ok(mask)
    }

    /// Back out of masking: drop the mask (or the path being drawn).
    pub fn cancel_masking(&mut self) -> Result<(), SessionError> {
        match &self.state {
            EditingState::ImageMasked { source, .. } => {
                let source = Arc::clone(source);
                self.engine.clear();
                self.enter(EditingState::ImageGenerated { source });
                Ok(())
            }
            EditingState::ImageGenerated { .. } => {
                self.engine.clear();
                Ok(())
            }
            EditingState::Initial | EditingState::Loading | EditingState::Error { .. } => {
                Err(self.illegal("cancel masking"))
            }
        }
    }

    /// The user picked the image again to draw a new region.
    pub fn select_image(&mut self) -> Result<(), SessionError> {
        match &self.state {
            EditingState::ImageMasked { source, .. } | EditingState::ImageGenerated { source } => {
                let source = Arc::clone(source);
                self.engine.clear();
                self.enter(EditingState::ImageGenerated { source });
                Ok(())
            }
            EditingState::Initial | EditingState::Loading | EditingState::Error { .. } => {
                Err(self.illegal("select the image"))
            }
        }
    }

    /// Discard the path being drawn without leaving the current state.
    pub fn clear_path(&mut self) {
        self.engine.clear();
    }
}
