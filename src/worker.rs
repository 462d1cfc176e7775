//! Finalize off the interaction thread.
//!
//! The worker only ever sees a [`StrokeSnapshot`], so the live path may keep
//! changing while it rasterizes. A [`CancelToken`] lets the caller throw away
//! a result that went stale (the user canceled or switched images).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::engine::StrokeSnapshot;
use crate::error::MaskError;
use crate::raster;
use crate::types::MaskBitmap;

/// Shared cancel flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A mask being rasterized on a worker thread.
#[derive(Debug)]
pub struct PendingMask {
    job: Job,
    token: CancelToken,
    revision: u64,
}

#[derive(Debug)]
enum Job {
    Running(JoinHandle<Result<MaskBitmap, MaskError>>),
    /// Produced without a worker (thread spawn failed).
    Ready(Result<MaskBitmap, MaskError>),
    Taken,
}

/// Rasterize `snapshot` at `width × height` on a new thread.
///
/// Dimensions are checked here, before any thread is spawned.
pub fn spawn_finalize(
    snapshot: StrokeSnapshot,
    width: i32,
    height: i32,
) -> Result<PendingMask, MaskError> {
    raster::validate_dimensions(width, height)?;
    let token = CancelToken::new();
    let revision = snapshot.revision();
    let fallback = snapshot.clone();
    let worker_token = token.clone();
    let spawned = thread::Builder::new()
        .name("mask-finalize".into())
        .spawn(move || {
            if worker_token.is_canceled() {
                return Err(MaskError::Canceled);
            }
            let mask = snapshot.rasterize(width, height)?;
            if worker_token.is_canceled() {
                return Err(MaskError::Canceled);
            }
            Ok(mask)
        });
    let job = match spawned {
        Ok(handle) => {
            debug!("finalize worker started for rev={revision}");
            Job::Running(handle)
        }
        Err(e) => {
            warn!("could not spawn finalize worker ({e}), rasterizing inline");
            Job::Ready(fallback.rasterize(width, height))
        }
    };
    Ok(PendingMask { job, token, revision })
}

impl PendingMask {
    /// Revision of the path this mask is being built from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        match &self.job {
            Job::Running(handle) => handle.is_finished(),
            Job::Ready(_) | Job::Taken => true,
        }
    }

    /// Take the result if the worker is done; `None` while it still runs.
    /// Once taken, further polls report [`MaskError::Canceled`].
    pub fn poll(&mut self) -> Option<Result<MaskBitmap, MaskError>> {
        if !self.is_finished() {
            return None;
        }
        Some(self.take())
    }

    /// Block until the worker finishes.
    pub fn wait(mut self) -> Result<MaskBitmap, MaskError> {
        self.take()
    }

    fn take(&mut self) -> Result<MaskBitmap, MaskError> {
        let result = match std::mem::replace(&mut self.job, Job::Taken) {
            Job::Running(handle) => handle.join().unwrap_or_else(|_| {
                warn!("finalize worker panicked");
                Err(MaskError::Canceled)
            }),
            Job::Ready(result) => result,
            Job::Taken => return Err(MaskError::Canceled),
        };
        if self.token.is_canceled() {
            return Err(MaskError::Canceled);
        }
        result
    }
}

impl Drop for PendingMask {
    fn drop(&mut self) {
        // Nobody will read the result; let the worker stop early.
        if matches!(self.job, Job::Running(_)) {
            self.token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MaskEngine;
    use crate::types::MASKED;

    fn drawn_engine() -> MaskEngine {
        let mut engine = MaskEngine::new();
        engine.begin_stroke((10.0, 10.0));
        engine.extend_stroke((60.0, 10.0));
        engine
    }

    #[test]
    fn background_result_matches_inline() {
        let mut engine = drawn_engine();
        let pending = spawn_finalize(engine.snapshot(), 80, 40).unwrap();
        let background = pending.wait().unwrap();
        let inline = engine.finalize(80, 40).unwrap();
        assert_eq!(background, inline);
        assert_eq!(background.get(30, 10), Some(MASKED));
    }

    #[test]
    fn rejects_bad_dimensions_up_front() {
        let engine = drawn_engine();
        let err = spawn_finalize(engine.snapshot(), 0, 40).unwrap_err();
        assert_eq!(err, MaskError::InvalidDimensions { width: 0, height: 40 });
    }

    #[test]
    fn canceled_job_yields_no_mask() {
        let engine = drawn_engine();
        let pending = spawn_finalize(engine.snapshot(), 80, 40).unwrap();
        pending.cancel();
        assert_eq!(pending.wait(), Err(MaskError::Canceled));
    }

    #[test]
    fn live_path_can_change_while_worker_runs() {
        let mut engine = drawn_engine();
        let rev = engine.revision();
        let mut pending = spawn_finalize(engine.snapshot(), 80, 40).unwrap();
        engine.clear();
        engine.begin_stroke((0.0, 39.0));
        assert_eq!(pending.revision(), rev);

        let mask = loop {
            if let Some(result) = pending.poll() {
                break result.unwrap();
            }
            std::thread::yield_now();
        };
        assert_eq!(mask.get(30, 10), Some(MASKED));
        assert!(pending.poll().is_some_and(|r| r.is_err()));
    }
}
