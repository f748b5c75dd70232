use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::{Result, ThumbsiftError};
use crate::frame::ScoredFrame;
use crate::pipeline::ProgressReporter;

use super::edge::EdgeDetector;

/// Scores every frame by how far its edge map strays from a pivot frame's map.
pub struct DiffScorer<'d, D> {
    detector: &'d D,
    parallel_threshold: usize,
}

impl<'d, D: EdgeDetector> DiffScorer<'d, D> {
    pub fn new(detector: &'d D) -> Self {
        Self {
            detector,
            parallel_threshold: PARALLEL_FRAME_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Fill in `diff_score` for every frame relative to `frames[pivot]`.
    ///
    /// The pivot itself is pinned to exactly 0.0 without consulting the
    /// detector. Fails with `PivotOutOfRange` if `pivot` is not a valid
    /// position in `frames`.
    pub fn score_against(
        &self,
        frames: &mut [ScoredFrame<'_, D::Map>],
        pivot: usize,
        reporter: &dyn ProgressReporter,
    ) -> Result<()> {
        let diffs = {
            let pivot_map = &frames
                .get(pivot)
                .ok_or(ThumbsiftError::PivotOutOfRange {
                    pivot,
                    len: frames.len(),
                })?
                .detail_map;
            let done = AtomicUsize::new(0);
            let diff_one = |(pos, frame): (usize, &ScoredFrame<'_, D::Map>)| {
                let d = if pos == pivot {
                    Ok(0.0)
                } else {
                    self.detector.diff(pivot_map, &frame.detail_map)
                };
                reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
                d
            };

            if frames.len() >= self.parallel_threshold {
                frames.par_iter().enumerate().map(diff_one).collect::<Result<Vec<f64>>>()?
            } else {
                frames.iter().enumerate().map(diff_one).collect::<Result<Vec<f64>>>()?
            }
        };

        for (frame, d) in frames.iter_mut().zip(diffs) {
            frame.diff_score = Some(d);
        }
        Ok(())
    }
}
