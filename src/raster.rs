//! Stroke policy and rasterization of a [`StrokePath`] into a [`MaskBitmap`].
//!
//! The mask is painted the way a platform canvas would: fill black, then
//! stroke the path in opaque white with a fixed-width, round-capped,
//! round-joined, anti-aliased pen. tiny-skia does the tessellation and
//! coverage. Segments are clipped to the canvas (plus one pen width) before
//! they are handed over, so any finite coordinate is fine.

use log::debug;
use tiny_skia::{Color, LineCap, LineJoin, Paint, Pixmap, Stroke, Transform};

use crate::error::MaskError;
use crate::path::StrokePath;
use crate::types::MaskBitmap;

/// Pen width in source-image pixels. Fixed so masks have the same
/// granularity everywhere.
pub const STROKE_WIDTH: f32 = 40.0;
pub const STROKE_CAP: LineCap = LineCap::Round;
pub const STROKE_JOIN: LineJoin = LineJoin::Round;

/// Check `finalize`-style dimensions. Non-positive sizes are a caller bug.
pub fn validate_dimensions(width: i32, height: i32) -> Result<(u32, u32), MaskError> {
    if width <= 0 || height <= 0 {
        return Err(MaskError::InvalidDimensions { width, height });
    }
    Ok((width as u32, height as u32))
}

fn mask_stroke() -> Stroke {
    Stroke {
        width: STROKE_WIDTH,
        line_cap: STROKE_CAP,
        line_join: STROKE_JOIN,
        ..Stroke::default()
    }
}

/// Paint `path` into a fresh `width × height` mask.
pub fn rasterize(path: &StrokePath, width: i32, height: i32) -> Result<MaskBitmap, MaskError> {
    let (w, h) = validate_dimensions(width, height)?;

    // Pixmap::new refuses sizes whose byte count would overflow.
    let mut pixmap = Pixmap::new(w, h).ok_or(MaskError::InvalidDimensions { width, height })?;
    pixmap.fill(Color::BLACK);

    match path.to_skia(w as f32, h as f32, STROKE_WIDTH) {
        Some(outline) => {
            let mut paint = Paint::default();
            paint.set_color(Color::WHITE);
            paint.anti_alias = true;
            pixmap.stroke_path(&outline, &paint, &mask_stroke(), Transform::identity(), None);
            debug!("rasterize: {} points into {w}x{h}", path.len());
        }
        None => debug!("rasterize: empty path, {w}x{h} all unmasked"),
    }

    // Opaque white over opaque black: red == green == blue == coverage.
    let pixels: Vec<u8> = pixmap.data().chunks_exact(4).map(|px| px[0]).collect();
    Ok(MaskBitmap::from_raw(w, h, pixels))
}
