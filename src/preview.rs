//! What the window shows on top of the source image.
//!
//! Rendering never mutates the engine: it reads a snapshot and the revision
//! counter, and only re-rasterizes when the revision moved.

use log::trace;

use crate::engine::MaskEngine;
use crate::error::MaskError;
use crate::gamma::GammaLut;
use crate::types::{FrameBuffer, MaskBitmap, UNMASKED};

/// Opacity of the in-progress stroke drawn over the source.
pub const STROKE_PREVIEW_OPACITY: f32 = 0.7;
/// Opacity of a finalized mask laid over the source.
pub const MASK_OVERLAY_OPACITY: f32 = 0.5;
pub const WHITE: u32 = 0x00FF_FFFF;

/// Coverage of the current path, cached by engine revision.
#[derive(Debug, Default)]
pub struct PreviewCache {
    revision: Option<u64>,
    size: (i32, i32),
    coverage: Option<MaskBitmap>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coverage for the engine's current path at `width × height`.
    /// `None` while the path is empty.
    pub fn coverage(
        &mut self,
        engine: &MaskEngine,
        width: i32,
        height: i32,
    ) -> Result<Option<&MaskBitmap>, MaskError> {
        let stale = self.revision != Some(engine.revision()) || self.size != (width, height);
        if stale {
            trace!("preview: re-rasterizing for rev={}", engine.revision());
            self.coverage = if engine.is_empty() {
                None
            } else {
                Some(engine.snapshot().rasterize(width, height)?)
            };
            self.revision = Some(engine.revision());
            self.size = (width, height);
        }
        Ok(self.coverage.as_ref())
    }

    /// Revision the cached coverage was built from.
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }
}

/// Blend `color` into `frame` wherever `coverage` is set, scaled by `opacity`.
pub fn composite_overlay(
    frame: &mut FrameBuffer,
    coverage: &MaskBitmap,
    color: u32,
    opacity: f32,
    lut: &GammaLut,
) -> Result<(), MaskError> {
    if (coverage.width() as usize, coverage.height() as usize) != (frame.width, frame.height) {
        return Err(MaskError::InvalidDimensions {
            width: coverage.width() as i32,
            height: coverage.height() as i32,
        });
    }
    for (px, &c) in frame.pixels.iter_mut().zip(coverage.pixels()) {
        if c == UNMASKED {
            continue;
        }
        let a = opacity * (c as f32 / 255.0);
        *px = lut.mix_rgb(*px, color, a);
    }
    Ok(())
}

/// Lay a finalized mask over the source: white where masked, darkened
/// where kept, like a half-transparent mask image on top.
pub fn composite_mask(
    frame: &mut FrameBuffer,
    mask: &MaskBitmap,
    lut: &GammaLut,
) -> Result<(), MaskError> {
    if (mask.width() as usize, mask.height() as usize) != (frame.width, frame.height) {
        return Err(MaskError::InvalidDimensions {
            width: mask.width() as i32,
            height: mask.height() as i32,
        });
    }
    for (px, &m) in frame.pixels.iter_mut().zip(mask.pixels()) {
        let gray = m as u32;
        let mask_px = (gray << 16) | (gray << 8) | gray;
        *px = lut.mix_rgb(*px, mask_px, MASK_OVERLAY_OPACITY);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_follows_revision() {
        let mut engine = MaskEngine::new();
        let mut cache = PreviewCache::new();
        assert!(cache.coverage(&engine, 50, 50).unwrap().is_none());

        engine.begin_stroke((0.0, 25.0));
        engine.extend_stroke((50.0, 25.0));
        let rev = engine.revision();
        assert!(cache.coverage(&engine, 50, 50).unwrap().is_some());
        assert_eq!(cache.revision(), Some(rev));

        engine.clear();
        assert!(cache.coverage(&engine, 50, 50).unwrap().is_none());
        assert_eq!(cache.revision(), Some(engine.revision()));
    }

    #[test]
    fn overlay_only_touches_covered_pixels() {
        let lut = GammaLut::new();
        let mut engine = MaskEngine::new();
        engine.begin_stroke((0.0, 5.0));
        engine.extend_stroke((100.0, 5.0));
        let coverage = engine.snapshot().rasterize(100, 100).unwrap();

        let mut frame = FrameBuffer::filled(100, 100, 0);
        composite_overlay(&mut frame, &coverage, WHITE, STROKE_PREVIEW_OPACITY, &lut).unwrap();
        assert_ne!(frame.pixels[5 * 100 + 50], 0);
        assert_eq!(frame.pixels[90 * 100 + 50], 0);
    }

    #[test]
    fn overlay_rejects_mismatched_sizes() {
        let lut = GammaLut::new();
        let mut frame = FrameBuffer::filled(4, 4, 0);
        let mask = MaskBitmap::unmasked(5, 4);
        assert!(composite_overlay(&mut frame, &mask, WHITE, 1.0, &lut).is_err());
        assert!(composite_mask(&mut frame, &mask, &lut).is_err());
    }
}
