use serde::Serialize;

use crate::frame::FrameScores;
use crate::stats::StatBounds;

/// Frame-selection stage, used for progress reporting and error context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    DetailScoring,
    DetailFilter,
    PivotSelection,
    DiffScoring,
    DiffFilter,
    Selection,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DetailScoring => write!(f, "Scoring detail"),
            Self::DetailFilter => write!(f, "Filtering by detail"),
            Self::PivotSelection => write!(f, "Choosing pivot"),
            Self::DiffScoring => write!(f, "Diffing against pivot"),
            Self::DiffFilter => write!(f, "Filtering by difference"),
            Self::Selection => write!(f, "Selecting frame"),
        }
    }
}

/// Everything the pipeline decided for one frame sequence.
///
/// Indices refer to positions in the slice passed to
/// [`FrameSelectionPipeline::select`](super::FrameSelectionPipeline::select).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSelection {
    pub selected_index: usize,
    pub pivot_index: usize,
    pub scores: FrameScores,
    pub detail_bounds: StatBounds,
    pub diff_bounds: StatBounds,
    /// Survivors of the detail filter, ascending by detail score.
    pub detail_retained: Vec<usize>,
    /// Survivors of the diff filter, ascending by diff score.
    pub diff_retained: Vec<usize>,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars or logging.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage, if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// Work items completed so far within the current stage.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `select` delegates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
