use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{Collaborator, Result, ThumbsiftError};
use crate::frame::FrameScores;
use crate::keywords::{KeywordConfig, KeywordScoreMap, KeywordScorer};
use crate::pipeline::{FrameSelectionPipeline, NoOpReporter, ProgressReporter};
use crate::quality::{EdgeDetector, LaplacianDetector};

use super::config::{AnalysisConfig, CategoryShortcut};
use super::sources::{CategoryScores, Classifier, FrameSource, TextSource};

/// Complete score bundle for one video.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub category_scores: CategoryScores,
    pub frame_scores: FrameScores,
    pub keyword_scores: KeywordScoreMap,
}

/// Runs frame selection, classification and keyword scoring for a video.
///
/// Holds no per-video state; `analyze` may be called concurrently.
pub struct VideoAnalyzer<D> {
    pipeline: FrameSelectionPipeline<D>,
    frames: Arc<dyn FrameSource>,
    text: Arc<dyn TextSource>,
    classifier: Arc<dyn Classifier>,
    class_names: Vec<String>,
    shortcuts: Vec<CategoryShortcut>,
}

impl VideoAnalyzer<LaplacianDetector> {
    /// Analyzer with the Laplacian detector and the settings from `config`.
    pub fn from_config(
        config: &AnalysisConfig,
        frames: Arc<dyn FrameSource>,
        text: Arc<dyn TextSource>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        let detector = config.selection.detector();
        let pipeline = FrameSelectionPipeline::with_config(detector, config.selection.clone());
        Self::new(pipeline, frames, text, classifier)
            .with_class_names(config.class_names.clone())
            .with_shortcuts(config.shortcuts.clone())
    }
}

impl<D: EdgeDetector> VideoAnalyzer<D> {
    pub fn new(
        pipeline: FrameSelectionPipeline<D>,
        frames: Arc<dyn FrameSource>,
        text: Arc<dyn TextSource>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            pipeline,
            frames,
            text,
            classifier,
            class_names: Vec::new(),
            shortcuts: Vec::new(),
        }
    }

    /// Fallback labels for the zero-filled category map.
    pub fn with_class_names(mut self, class_names: Vec<String>) -> Self {
        self.class_names = class_names;
        self
    }

    pub fn with_shortcuts(mut self, shortcuts: Vec<CategoryShortcut>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    pub fn analyze(&self, video_id: &str, keywords: &KeywordConfig) -> Result<AnalysisResult> {
        self.analyze_reported(video_id, keywords, &NoOpReporter)
    }

    /// Text is fetched first: a matching category shortcut settles the video
    /// without touching frames or the classifier.
    pub fn analyze_reported(
        &self,
        video_id: &str,
        keywords: &KeywordConfig,
        reporter: &dyn ProgressReporter,
    ) -> Result<AnalysisResult> {
        let scorer = KeywordScorer::new(keywords)
            .inspect_err(|e| error!(video_id, stage = "keyword config", error = %e))?;

        let text = self
            .text
            .fetch_text(video_id)
            .map_err(|e| collaborator_failure(Collaborator::TextSource, video_id, e))?;
        let mut keyword_scores = scorer.score(&text);

        if let Some(shortcut) = self.shortcuts.iter().find(|s| s.matches(&text.category)) {
            info!(
                video_id,
                category = %text.category,
                keyword_category = %shortcut.keyword_category,
                "Category shortcut applied, skipping frame analysis"
            );
            keyword_scores.set(&shortcut.keyword_category, shortcut.boost);
            return Ok(AnalysisResult {
                category_scores: self.zero_category_scores(),
                frame_scores: FrameScores::default(),
                keyword_scores,
            });
        }

        let frames = self
            .frames
            .fetch_frames(video_id)
            .map_err(|e| collaborator_failure(Collaborator::FrameSource, video_id, e))?;

        let selection = self.pipeline.select_reported(&frames, reporter);
        let (category_scores, frame_scores) = match selection {
            Ok(selection) => {
                let chosen = &frames[selection.selected_index];
                let categories = self
                    .classifier
                    .classify(chosen)
                    .map_err(|e| collaborator_failure(Collaborator::Classifier, video_id, e))?;
                (categories, selection.scores)
            }
            Err(ThumbsiftError::NoFrames) => {
                warn!(video_id, "No frames available, returning keyword scores only");
                (self.zero_category_scores(), FrameScores::default())
            }
            Err(e) => {
                let e = e.for_video(video_id);
                error!(video_id, error = %e, "Frame selection failed");
                return Err(e);
            }
        };

        info!(
            video_id,
            frames = frames.len(),
            detail_score = frame_scores.detail_score,
            diff_score = frame_scores.diff_score,
            "Video analysed"
        );

        Ok(AnalysisResult {
            category_scores,
            frame_scores,
            keyword_scores,
        })
    }

    fn zero_category_scores(&self) -> CategoryScores {
        let names = self.classifier.class_names();
        let names = if names.is_empty() {
            self.class_names.clone()
        } else {
            names
        };
        names.into_iter().map(|name| (name, 0.0)).collect()
    }
}

/// Attribute a collaborator's error to the collaborator and video being
/// served. An error that already names a collaborator keeps only its reason.
fn collaborator_failure(
    collaborator: Collaborator,
    video_id: &str,
    err: ThumbsiftError,
) -> ThumbsiftError {
    error!(video_id, stage = %collaborator, error = %err, "Collaborator failed");
    match err {
        ThumbsiftError::CollaboratorUnavailable { reason, .. } => {
            ThumbsiftError::unavailable(collaborator, video_id, reason)
        }
        other => ThumbsiftError::unavailable(collaborator, video_id, other),
    }
}
