mod config;
mod orchestrator;
mod sources;

pub use config::{AnalysisConfig, CategoryShortcut};
pub use orchestrator::{AnalysisResult, VideoAnalyzer};
pub use sources::{CategoryScores, Classifier, FrameSource, TextSource};
