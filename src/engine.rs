//! The mask authoring engine.
//!
//! Owns the stroke path for one editing session and a revision counter that
//! ticks on every mutation, so views can redraw by comparing one integer
//! instead of comparing paths. Every operation is a plain state transition;
//! nothing here knows about windows or frames.

use log::{debug, info, warn};

use crate::error::MaskError;
use crate::path::StrokePath;
use crate::raster;
use crate::types::{MaskBitmap, Point};

/// How a new drag relates to strokes drawn before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrokeMode {
    /// Each new drag replaces the path (one subpath per mask).
    #[default]
    SingleStroke,
    /// Each new drag adds a disjoint subpath; all of them end up in the mask.
    Accumulate,
}

/// A frozen copy of the path, safe to hand to another thread.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeSnapshot {
    path: StrokePath,
    revision: u64,
}

impl StrokeSnapshot {
    pub fn path(&self) -> &StrokePath {
        &self.path
    }

    /// Revision of the engine when the snapshot was taken.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn rasterize(&self, width: i32, height: i32) -> Result<MaskBitmap, MaskError> {
        raster::rasterize(&self.path, width, height)
    }
}

#[derive(Debug, Default)]
pub struct MaskEngine {
    path: StrokePath,
    revision: u64,
    mode: StrokeMode,
    /// A drag is in progress; `extend_stroke` only appends while this is set.
    pen_down: bool,
}

impl MaskEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: StrokeMode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn path(&self) -> &StrokePath {
        &self.path
    }

    /// Nothing to stroke yet (a bare starting point does not count).
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Start a stroke at `point`.
    pub fn begin_stroke(&mut self, point: impl Into<Point>) {
        let point = point.into();
        self.bump();
        if self.mode == StrokeMode::SingleStroke {
            self.path.clear();
        }
        self.pen_down = point.is_finite();
        if !self.pen_down {
            warn!("begin_stroke: ignoring non-finite point {point:?}");
            return;
        }
        self.path.move_to(point);
        debug!("begin_stroke at ({}, {}) rev={}", point.x, point.y, self.revision);
    }

    /// Extend the current stroke to `point`. Without a started stroke (or
    /// after a rejected start) the geometry is left alone.
    pub fn extend_stroke(&mut self, point: impl Into<Point>) {
        let point = point.into();
        self.bump();
        if !point.is_finite() {
            warn!("extend_stroke: ignoring non-finite point {point:?}");
            return;
        }
        if !self.pen_down || !self.path.line_to(point) {
            debug!("extend_stroke without begin_stroke, rev={}", self.revision);
        }
    }

    /// Drop the path without producing a mask.
    pub fn clear(&mut self) {
        self.path.clear();
        self.pen_down = false;
        self.bump();
        debug!("clear rev={}", self.revision);
    }

    pub fn snapshot(&self) -> StrokeSnapshot {
        StrokeSnapshot { path: self.path.clone(), revision: self.revision }
    }

    /// Rasterize the path into a `width × height` mask and reset the path.
    ///
    /// Non-positive dimensions are rejected with
    /// [`MaskError::InvalidDimensions`]; the path is kept in that case.
    pub fn finalize(&mut self, width: i32, height: i32) -> Result<MaskBitmap, MaskError> {
        let mask = raster::rasterize(&self.path, width, height)?;
        info!(
            "finalized {}x{} mask from {} points ({} fully masked px)",
            mask.width(),
            mask.height(),
            self.path.len(),
            mask.masked_count()
        );
        self.clear();
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MASKED, UNMASKED};

    #[test]
    fn every_mutation_bumps_revision() {
        let mut engine = MaskEngine::new();
        let mut last = engine.revision();
        let mut check = |engine: &MaskEngine| {
            assert!(engine.revision() > last);
            last = engine.revision();
        };
        engine.extend_stroke((1.0, 1.0));
        check(&engine);
        engine.begin_stroke((1.0, 1.0));
        check(&engine);
        engine.extend_stroke((2.0, 2.0));
        check(&engine);
        engine.clear();
        check(&engine);
        engine.clear();
        check(&engine);
        engine.begin_stroke((f32::NAN, 0.0));
        check(&engine);
    }

    #[test]
    fn extend_without_begin_keeps_path_empty() {
        let mut engine = MaskEngine::new();
        engine.extend_stroke((5.0, 5.0));
        engine.extend_stroke((9.0, 5.0));
        assert!(engine.is_empty());
        assert!(engine.finalize(20, 20).unwrap().is_blank());
    }

    #[test]
    fn single_stroke_mode_replaces_previous_drag() {
        let mut engine = MaskEngine::new();
        engine.begin_stroke((10.0, 10.0));
        engine.extend_stroke((90.0, 10.0));
        engine.begin_stroke((10.0, 90.0));
        engine.extend_stroke((90.0, 90.0));
        assert_eq!(engine.path().subpaths().len(), 1);

        let mask = engine.finalize(100, 100).unwrap();
        assert_eq!(mask.get(50, 10), Some(UNMASKED));
        assert_eq!(mask.get(50, 90), Some(MASKED));
    }

    #[test]
    fn accumulate_mode_keeps_both_drags() {
        let mut engine = MaskEngine::with_mode(StrokeMode::Accumulate);
        engine.begin_stroke((10.0, 10.0));
        engine.extend_stroke((90.0, 10.0));
        engine.begin_stroke((10.0, 90.0));
        engine.extend_stroke((90.0, 90.0));
        assert_eq!(engine.path().subpaths().len(), 2);

        let mask = engine.finalize(100, 100).unwrap();
        assert_eq!(mask.get(50, 10), Some(MASKED));
        assert_eq!(mask.get(50, 90), Some(MASKED));
        assert_eq!(mask.get(50, 50), Some(UNMASKED));
    }

    #[test]
    fn finalize_clears_path_and_rejection_keeps_it() {
        let mut engine = MaskEngine::new();
        engine.begin_stroke((0.0, 0.0));
        engine.extend_stroke((10.0, 0.0));

        let before = engine.revision();
        assert!(engine.finalize(-3, 10).is_err());
        assert_eq!(engine.revision(), before);
        assert!(!engine.is_empty());

        engine.finalize(10, 10).unwrap();
        assert!(engine.is_empty());
        assert!(engine.revision() > before);
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let mut engine = MaskEngine::new();
        engine.begin_stroke((4.0, 4.0));
        engine.extend_stroke((f32::INFINITY, 4.0));
        engine.extend_stroke((8.0, f32::NAN));
        assert_eq!(engine.path().len(), 1);
    }

    #[test]
    fn rejected_start_never_joins_the_previous_drag() {
        let mut engine = MaskEngine::new();
        engine.begin_stroke((10.0, 10.0));
        engine.extend_stroke((20.0, 10.0));
        engine.begin_stroke((f32::NAN, 90.0));
        engine.extend_stroke((90.0, 90.0));
        assert!(engine.is_empty());

        let mask = engine.finalize(100, 100).unwrap();
        assert_eq!(mask.get(15, 10), Some(UNMASKED));
        assert_eq!(mask.get(55, 50), Some(UNMASKED));
        assert!(mask.is_blank());
    }

    #[test]
    fn rejected_start_keeps_earlier_drags_when_accumulating() {
        let mut engine = MaskEngine::with_mode(StrokeMode::Accumulate);
        engine.begin_stroke((10.0, 10.0));
        engine.extend_stroke((90.0, 10.0));
        engine.begin_stroke((f32::INFINITY, 90.0));
        engine.extend_stroke((90.0, 90.0));
        assert_eq!(engine.path().subpaths().len(), 1);
        assert_eq!(engine.path().len(), 2);

        let mask = engine.finalize(100, 100).unwrap();
        assert_eq!(mask.get(50, 10), Some(MASKED));
        assert_eq!(mask.get(90, 60), Some(UNMASKED));
    }

    #[test]
    fn snapshot_is_detached_from_engine() {
        let mut engine = MaskEngine::new();
        engine.begin_stroke((0.0, 5.0));
        engine.extend_stroke((50.0, 5.0));
        let snap = engine.snapshot();
        assert_eq!(snap.revision(), engine.revision());

        engine.clear();
        assert!(engine.is_empty());
        assert!(!snap.path().is_empty());
        assert_eq!(snap.rasterize(60, 60).unwrap().get(25, 5), Some(MASKED));
    }
}
