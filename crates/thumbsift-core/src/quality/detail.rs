use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::Result;
use crate::frame::{RawImage, ScoredFrame};
use crate::pipeline::ProgressReporter;

use super::edge::EdgeDetector;

/// Turns raw frames into [`ScoredFrame`]s carrying their edge map and a
/// detail score (the squared edge deviation).
pub struct DetailScorer<'d, D> {
    detector: &'d D,
    parallel_threshold: usize,
}

impl<'d, D: EdgeDetector> DetailScorer<'d, D> {
    pub fn new(detector: &'d D) -> Self {
        Self {
            detector,
            parallel_threshold: PARALLEL_FRAME_THRESHOLD,
        }
    }

    /// Frame count at or above which scoring fans out over the Rayon pool.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn score_one<'a>(
        &self,
        index: usize,
        image: &'a RawImage,
    ) -> Result<ScoredFrame<'a, D::Map>> {
        let (detail_map, stddev) = self.detector.detect(image)?;
        Ok(ScoredFrame {
            index,
            image,
            detail_map,
            detail_score: stddev * stddev,
            diff_score: None,
        })
    }

    /// Score every frame. The output is in input order regardless of which
    /// worker finished first; `reporter.advance` sees the running count.
    pub fn score_all<'a>(
        &self,
        images: &'a [RawImage],
        reporter: &dyn ProgressReporter,
    ) -> Result<Vec<ScoredFrame<'a, D::Map>>> {
        let done = AtomicUsize::new(0);
        let score = |(i, image): (usize, &'a RawImage)| {
            let scored = self.score_one(i, image);
            reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
            scored
        };

        if images.len() >= self.parallel_threshold {
            images.par_iter().enumerate().map(score).collect()
        } else {
            images.iter().enumerate().map(score).collect()
        }
    }
}
