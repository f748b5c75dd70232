pub mod config;
mod selection;
mod types;

pub use config::SelectionConfig;
pub use selection::{median_position, pivot_position, FrameSelectionPipeline};
pub use types::{FrameSelection, NoOpReporter, PipelineStage, ProgressReporter};
