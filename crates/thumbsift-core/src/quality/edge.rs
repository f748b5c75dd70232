use crate::error::Result;
use crate::frame::RawImage;

/// Edge/detail primitive backing the frame-selection pipeline.
///
/// `detect` is the only place raw image bytes are decoded. The returned map is
/// kept for the lifetime of one analysis and diffed against the pivot's map.
pub trait EdgeDetector: Send + Sync {
    type Map: Send + Sync;

    /// Edge map of `image` and the standard deviation of its edge response.
    fn detect(&self, image: &RawImage) -> Result<(Self::Map, f64)>;

    /// Sum of absolute per-element differences between two maps.
    ///
    /// Non-negative, symmetric up to rounding, and exactly 0 for `diff(a, a)`.
    fn diff(&self, a: &Self::Map, b: &Self::Map) -> Result<f64>;
}
