// Error types, one enum per layer.
// The mask core can only fail on bad dimensions; everything else
// (window, camera, files) belongs to the demo shell.

/// Errors produced while turning strokes into a mask.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaskError {
    /// `finalize` was called with a non-positive (or unallocatable) size.
    #[error("invalid mask dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// A background finalize was canceled before its result was taken.
    #[error("mask rasterization canceled")]
    Canceled,
}

/// Errors raised by the editing session when an action does not fit the state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} while {from}")]
    IllegalTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error(transparent)]
    Mask(#[from] MaskError),
}

/// Everything the `mask-painter` binary can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // creating the window failed

    #[error("window update error: {0}")]
    WindowUpdate(String), // pushing the frame failed

    #[error("camera init error: {0}")]
    CameraInit(String),

    #[error("camera frame error: {0}")]
    CameraFrame(String),

    #[error("no source image: pass --input <file> or --camera <index>")]
    NoSource,

    #[error("failed to load {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save {path}: {source}")]
    ImageSave {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
