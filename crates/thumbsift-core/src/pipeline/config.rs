use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_WORKING_HEIGHT, DEFAULT_WORKING_WIDTH, PARALLEL_FRAME_THRESHOLD};
use crate::quality::LaplacianDetector;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Working image width for edge detection; 0 keeps native resolution.
    pub working_width: u32,
    /// Working image height for edge detection; 0 keeps native resolution.
    pub working_height: u32,
    /// Frame count at or above which scoring runs on the Rayon pool.
    pub parallel_threshold: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            working_width: DEFAULT_WORKING_WIDTH,
            working_height: DEFAULT_WORKING_HEIGHT,
            parallel_threshold: PARALLEL_FRAME_THRESHOLD,
        }
    }
}

impl SelectionConfig {
    /// Laplacian detector matching the configured working size.
    pub fn detector(&self) -> LaplacianDetector {
        if self.working_width == 0 || self.working_height == 0 {
            LaplacianDetector::native()
        } else {
            LaplacianDetector::with_working_size(self.working_width, self.working_height)
        }
    }
}
