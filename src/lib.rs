//! Free-hand mask authoring for image inpainting.
//!
//! Pointer drags become a vector stroke path ([`MaskEngine`]); finalizing
//! strokes that path with a fixed 40px round pen onto a black bitmap the size
//! of the source image, giving a white-on-black [`MaskBitmap`] an inpainting
//! service can consume (white = regenerate, black = keep).
//!
//! ```
//! use inpaint_mask::{MaskEngine, MASKED, UNMASKED};
//!
//! let mut engine = MaskEngine::new();
//! engine.begin_stroke((10.0, 10.0));
//! engine.extend_stroke((50.0, 10.0));
//! engine.extend_stroke((50.0, 50.0));
//! let mask = engine.finalize(100, 100)?;
//!
//! assert_eq!(mask.dimensions(), (100, 100));
//! assert_eq!(mask.get(30, 10), Some(MASKED));
//! assert_eq!(mask.get(90, 90), Some(UNMASKED));
//! assert!(engine.is_empty());
//! # Ok::<(), inpaint_mask::MaskError>(())
//! ```
//!
//! [`EditingSession`] wraps the engine in the editing view state, and
//! [`worker::spawn_finalize`] moves rasterization off the caller's thread.

pub mod engine;
pub mod error;
pub mod gamma;
pub mod gesture;
pub mod path;
pub mod preview;
pub mod raster;
pub mod session;
pub mod types;
pub mod worker;

pub use engine::{MaskEngine, StrokeMode, StrokeSnapshot};
pub use error::{Error, MaskError, SessionError};
pub use path::StrokePath;
pub use raster::STROKE_WIDTH;
pub use session::{EditingSession, EditingState};
pub use types::{FrameBuffer, MaskBitmap, Point, MASKED, UNMASKED};
