use std::collections::BTreeMap;

use crate::error::Result;
use crate::frame::RawImage;
use crate::keywords::VideoText;

/// Classifier output: label -> confidence.
pub type CategoryScores = BTreeMap<String, f64>;

/// Supplies the ordered frames of a video's storyboard. May return an empty
/// sequence.
pub trait FrameSource: Send + Sync {
    fn fetch_frames(&self, video_id: &str) -> Result<Vec<RawImage>>;
}

/// Supplies a video's text metadata.
pub trait TextSource: Send + Sync {
    fn fetch_text(&self, video_id: &str) -> Result<VideoText>;
}

/// Image classifier handle. Constructed by the caller and owned by the
/// analyzer; invoked once per video with the selected frame.
pub trait Classifier: Send + Sync {
    fn classify(&self, image: &RawImage) -> Result<CategoryScores>;

    /// Labels this classifier produces. Used to build a zero-filled score map
    /// when there is no frame to classify. Empty means "unknown".
    fn class_names(&self) -> Vec<String> {
        Vec::new()
    }
}
