use tracing::{debug, info};

use crate::error::{Result, ThumbsiftError};
use crate::frame::{FrameScores, RawImage, ScoredFrame};
use crate::quality::{DetailScorer, DiffScorer, EdgeDetector};
use crate::stats::{mean, OutlierFilter};

use super::config::SelectionConfig;
use super::types::{FrameSelection, NoOpReporter, PipelineStage, ProgressReporter};

/// Picks one representative frame from a storyboard sequence.
///
/// Stages run strictly in order:
/// 1. score detail for every frame,
/// 2. drop detail outliers, sort survivors ascending by detail,
/// 3. take the most detailed survivor as pivot,
/// 4. diff every survivor's edge map against the pivot's,
/// 5. drop diff outliers, sort survivors ascending by diff,
/// 6. select the middle element of that order.
pub struct FrameSelectionPipeline<D> {
    detector: D,
    config: SelectionConfig,
}

impl<D: EdgeDetector> FrameSelectionPipeline<D> {
    pub fn new(detector: D) -> Self {
        Self::with_config(detector, SelectionConfig::default())
    }

    pub fn with_config(detector: D, config: SelectionConfig) -> Self {
        Self { detector, config }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn select(&self, images: &[RawImage]) -> Result<FrameSelection> {
        self.select_reported(images, &NoOpReporter)
    }

    /// Like [`select`](Self::select), reporting progress per stage. Every
    /// failure after the empty-input check is wrapped in
    /// [`ThumbsiftError::Stage`] naming the stage that produced it.
    pub fn select_reported(
        &self,
        images: &[RawImage],
        reporter: &dyn ProgressReporter,
    ) -> Result<FrameSelection> {
        if images.is_empty() {
            return Err(ThumbsiftError::NoFrames);
        }
        let threshold = self.config.parallel_threshold;

        reporter.begin_stage(PipelineStage::DetailScoring, Some(images.len()));
        let scored = DetailScorer::new(&self.detector)
            .with_parallel_threshold(threshold)
            .score_all(images, reporter)
            .map_err(|e| e.in_stage(PipelineStage::DetailScoring))?;
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::DetailFilter, None);
        let (detail_bounds, detail_retained, detail_scores) = {
            let pass = OutlierFilter::new(|f: &ScoredFrame<'_, D::Map>| f.detail_score)
                .sorted()
                .apply(&scored)
                .map_err(|e| e.in_stage(PipelineStage::DetailFilter))?;
            let indices: Vec<usize> = pass.retained.iter().map(|f| f.index).collect();
            let values: Vec<f64> = pass.retained.iter().map(|f| f.detail_score).collect();
            (pass.bounds, indices, values)
        };
        reporter.finish_stage();
        debug!(
            frames = images.len(),
            retained = detail_retained.len(),
            mean = detail_bounds.mean,
            stddev = detail_bounds.stddev,
            "Detail filter applied"
        );

        let mut survivors = take_in_order(scored, &detail_retained);

        reporter.begin_stage(PipelineStage::PivotSelection, None);
        let pivot = pivot_position(&survivors)
            .ok_or_else(|| ThumbsiftError::EmptyInput.in_stage(PipelineStage::PivotSelection))?;
        let pivot_index = survivors[pivot].index;
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::DiffScoring, Some(survivors.len()));
        DiffScorer::new(&self.detector)
            .with_parallel_threshold(threshold)
            .score_against(&mut survivors, pivot, reporter)
            .map_err(|e| e.in_stage(PipelineStage::DiffScoring))?;
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::DiffFilter, None);
        let diff_pass = OutlierFilter::new(|f: &ScoredFrame<'_, D::Map>| f.diff_or_zero())
            .sorted()
            .apply(&survivors)
            .map_err(|e| e.in_stage(PipelineStage::DiffFilter))?;
        let diff_bounds = diff_pass.bounds;
        let diff_retained: Vec<usize> = diff_pass.retained.iter().map(|f| f.index).collect();
        let diff_scores: Vec<f64> = diff_pass.retained.iter().map(|f| f.diff_or_zero()).collect();
        reporter.finish_stage();
        debug!(
            frames = survivors.len(),
            retained = diff_retained.len(),
            mean = diff_bounds.mean,
            stddev = diff_bounds.stddev,
            "Diff filter applied"
        );

        reporter.begin_stage(PipelineStage::Selection, None);
        let empty = || ThumbsiftError::EmptyInput.in_stage(PipelineStage::Selection);
        let selected_index = median_position(diff_retained.len())
            .map(|pos| diff_retained[pos])
            .ok_or_else(empty)?;
        let scores = FrameScores {
            detail_score: mean(&detail_scores).ok_or_else(empty)?,
            diff_score: mean(&diff_scores).ok_or_else(empty)?,
        };
        reporter.finish_stage();

        info!(
            frames = images.len(),
            pivot = pivot_index,
            selected = selected_index,
            detail_score = scores.detail_score,
            diff_score = scores.diff_score,
            "Frame selected"
        );

        Ok(FrameSelection {
            selected_index,
            pivot_index,
            scores,
            detail_bounds,
            diff_bounds,
            detail_retained,
            diff_retained,
        })
    }
}

/// Position of the pivot within frames sorted ascending by detail: the
/// highest detail score, ties resolved to the first such frame in that order.
pub fn pivot_position<M>(sorted: &[ScoredFrame<'_, M>]) -> Option<usize> {
    let max = sorted
        .iter()
        .map(|f| f.detail_score)
        .max_by(|a, b| a.total_cmp(b))?;
    sorted.iter().position(|f| f.detail_score.total_cmp(&max).is_eq())
}

/// Middle position of a sequence of `len` elements: `len / 2`.
pub fn median_position(len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(len / 2)
    }
}

/// Move the frames listed in `order` (by original index) out of `frames`,
/// in that order. `frames[i].index` must equal `i`.
fn take_in_order<'a, M>(
    frames: Vec<ScoredFrame<'a, M>>,
    order: &[usize],
) -> Vec<ScoredFrame<'a, M>> {
    let mut slots: Vec<Option<ScoredFrame<'a, M>>> = frames.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots.get_mut(i)?.take()).collect()
}
