use ndarray::Array2;

use crate::consts::{DEFAULT_WORKING_HEIGHT, DEFAULT_WORKING_WIDTH};
use crate::error::{Result, ThumbsiftError};
use crate::frame::RawImage;
use crate::io::frames::decode_luminance;

use super::edge::EdgeDetector;

/// Laplacian response of one frame, shape `(h - 2, w - 2)` of the working image.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMap(Array2<f64>);

impl EdgeMap {
    pub fn new(data: Array2<f64>) -> Self {
        Self(data)
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.0
    }

    pub fn dim(&self) -> (usize, usize) {
        self.0.dim()
    }
}

/// Convolve with the 3x3 Laplacian kernel:
///   0  1  0
///   1 -4  1
///   0  1  0
/// The 1-pixel border is dropped, so the result is `(h - 2, w - 2)`.
pub fn laplacian_map(data: &Array2<f32>) -> Array2<f64> {
    let (h, w) = data.dim();
    if h < 3 || w < 3 {
        return Array2::zeros((0, 0));
    }

    let mut out = Array2::<f64>::zeros((h - 2, w - 2));
    for row in 1..h - 1 {
        for col in 1..w - 1 {
            out[[row - 1, col - 1]] = -4.0 * data[[row, col]] as f64
                + data[[row - 1, col]] as f64
                + data[[row + 1, col]] as f64
                + data[[row, col - 1]] as f64
                + data[[row, col + 1]] as f64;
        }
    }
    out
}

/// Population standard deviation of every element of `map`.
pub fn deviation(map: &Array2<f64>) -> f64 {
    let count = map.len() as f64;
    if count == 0.0 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for &v in map.iter() {
        sum += v;
        sum_sq += v * v;
    }

    let mean = sum / count;
    (sum_sq / count - mean * mean).max(0.0).sqrt()
}

/// Default [`EdgeDetector`]: grayscale luminance on a 0-255 scale, resampled
/// to a common working size, convolved with a discrete Laplacian.
#[derive(Clone, Debug)]
pub struct LaplacianDetector {
    working_size: Option<(u32, u32)>,
}

impl Default for LaplacianDetector {
    fn default() -> Self {
        Self {
            working_size: Some((DEFAULT_WORKING_WIDTH, DEFAULT_WORKING_HEIGHT)),
        }
    }
}

impl LaplacianDetector {
    /// Resample every frame to `width x height` before convolution.
    pub fn with_working_size(width: u32, height: u32) -> Self {
        Self {
            working_size: Some((width, height)),
        }
    }

    /// Keep frames at their native resolution. Maps of differently sized
    /// frames then cannot be diffed.
    pub fn native() -> Self {
        Self { working_size: None }
    }

    pub fn working_size(&self) -> Option<(u32, u32)> {
        self.working_size
    }
}

impl EdgeDetector for LaplacianDetector {
    type Map = EdgeMap;

    fn detect(&self, image: &RawImage) -> Result<(EdgeMap, f64)> {
        let luma = decode_luminance(image.as_bytes(), self.working_size)?;
        let (h, w) = luma.dim();
        if h < 3 || w < 3 {
            return Err(ThumbsiftError::InvalidDimensions {
                width: w as u32,
                height: h as u32,
            });
        }

        let map = laplacian_map(&luma);
        let stddev = deviation(&map);
        Ok((EdgeMap(map), stddev))
    }

    fn diff(&self, a: &EdgeMap, b: &EdgeMap) -> Result<f64> {
        if a.dim() != b.dim() {
            return Err(ThumbsiftError::DimensionMismatch {
                left: a.dim(),
                right: b.dim(),
            });
        }
        Ok(a.0.iter().zip(b.0.iter()).map(|(x, y)| (x - y).abs()).sum())
    }
}
