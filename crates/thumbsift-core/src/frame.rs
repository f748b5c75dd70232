use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One encoded frame (PNG, JPEG, WebP ...) as handed over by a frame source.
///
/// The bytes are shared, so cloning a `RawImage` never copies pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawImage {
    bytes: Arc<[u8]>,
}

impl RawImage {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for RawImage {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// A frame annotated with its edge map and scores.
///
/// `index` is the position of the frame in the sequence the pipeline was
/// given; it survives every filter and sort.
#[derive(Clone, Debug)]
pub struct ScoredFrame<'a, M> {
    pub index: usize,
    pub image: &'a RawImage,
    pub detail_map: M,
    /// Squared edge deviation; finite and non-negative.
    pub detail_score: f64,
    /// Set once the frame has been diffed against the pivot.
    pub diff_score: Option<f64>,
}

impl<M> ScoredFrame<'_, M> {
    /// Diff score, or 0.0 for a frame that was never diffed.
    pub fn diff_or_zero(&self) -> f64 {
        self.diff_score.unwrap_or(0.0)
    }
}

/// Aggregate frame scores for one video.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameScores {
    pub detail_score: f64,
    pub diff_score: f64,
}
