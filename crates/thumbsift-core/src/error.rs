use thiserror::Error;

use crate::pipeline::PipelineStage;

/// External collaborator that the analyzer depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collaborator {
    FrameSource,
    TextSource,
    Classifier,
}

impl std::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrameSource => write!(f, "frame source"),
            Self::TextSource => write!(f, "text source"),
            Self::Classifier => write!(f, "classifier"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ThumbsiftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Statistics are undefined for an empty input")]
    EmptyInput,

    #[error("Frame source returned no frames")]
    NoFrames,

    #[error("{collaborator} unavailable for video {video_id}: {reason}")]
    CollaboratorUnavailable {
        collaborator: Collaborator,
        video_id: String,
        reason: String,
    },

    #[error("Invalid keyword configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Edge map shape mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Pivot {pivot} out of range for {len} frames")]
    PivotOutOfRange { pivot: usize, len: usize },

    /// A frame-selection stage failed. `video_id` is filled in by the
    /// analyzer; the pipeline alone does not know which video it serves.
    #[error("{stage} failed{}: {source}", video_suffix(.video_id))]
    Stage {
        video_id: Option<String>,
        stage: PipelineStage,
        #[source]
        source: Box<ThumbsiftError>,
    },
}

fn video_suffix(video_id: &Option<String>) -> String {
    video_id
        .as_deref()
        .map(|id| format!(" for video {id}"))
        .unwrap_or_default()
}

impl ThumbsiftError {
    /// Wrap a collaborator failure with the video it was serving.
    pub fn unavailable(
        collaborator: Collaborator,
        video_id: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::CollaboratorUnavailable {
            collaborator,
            video_id: video_id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Record the pipeline stage an error came from. Errors that already
    /// carry a stage keep it.
    pub fn in_stage(self, stage: PipelineStage) -> Self {
        match self {
            e @ Self::Stage { .. } => e,
            other => Self::Stage {
                video_id: None,
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Attach the video being analysed to a stage error. Other errors are
    /// returned as they are.
    pub fn for_video(self, video_id: &str) -> Self {
        match self {
            Self::Stage { stage, source, .. } => Self::Stage {
                video_id: Some(video_id.to_string()),
                stage,
                source,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ThumbsiftError>;
