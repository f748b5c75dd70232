use image::{DynamicImage, GrayImage, Luma};

use thumbsift_core::error::{Result, ThumbsiftError};
use thumbsift_core::frame::RawImage;
use thumbsift_core::io::frames::encode_png;
use thumbsift_core::quality::EdgeDetector;

/// Edge detector driven by a lookup table instead of pixels.
///
/// A frame's first byte selects its row: `(detail_score, edge_map)`. The
/// reported deviation is `sqrt(detail_score)`, so the pipeline squares it
/// back to (approximately) the scripted score.
pub struct ScriptedDetector {
    table: Vec<(f64, Vec<f64>)>,
}

impl ScriptedDetector {
    pub fn new(table: Vec<(f64, Vec<f64>)>) -> Self {
        Self { table }
    }

    /// One-element maps: frame `i` gets detail `details[i]` and map `[maps[i]]`.
    pub fn from_columns(details: &[f64], maps: &[f64]) -> Self {
        Self::new(
            details
                .iter()
                .zip(maps)
                .map(|(&d, &m)| (d, vec![m]))
                .collect(),
        )
    }
}

impl EdgeDetector for ScriptedDetector {
    type Map = Vec<f64>;

    fn detect(&self, image: &RawImage) -> Result<(Vec<f64>, f64)> {
        let id = image.as_bytes().first().copied().unwrap_or(u8::MAX) as usize;
        let (detail, map) = self
            .table
            .get(id)
            .ok_or(ThumbsiftError::InvalidDimensions { width: 0, height: 0 })?;
        Ok((map.clone(), detail.sqrt()))
    }

    fn diff(&self, a: &Vec<f64>, b: &Vec<f64>) -> Result<f64> {
        if a.len() != b.len() {
            return Err(ThumbsiftError::DimensionMismatch {
                left: (1, a.len()),
                right: (1, b.len()),
            });
        }
        Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
    }
}

/// `n` frames whose single byte is their index.
pub fn id_frames(n: usize) -> Vec<RawImage> {
    (0..n).map(|i| RawImage::from(vec![i as u8])).collect()
}

pub fn png(img: GrayImage) -> RawImage {
    encode_png(&DynamicImage::ImageLuma8(img)).unwrap()
}

/// Checkerboard with square cells of `cell` pixels, shifted right by `shift`.
pub fn checkerboard(w: u32, h: u32, cell: u32, shift: u32) -> GrayImage {
    GrayImage::from_fn(w, h, |x, y| {
        let on = ((x + shift) / cell + y / cell) % 2 == 0;
        Luma([if on { 230 } else { 20 }])
    })
}

pub fn flat(w: u32, h: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(w, h, Luma([value]))
}

/// Horizontal brightness ramp, smooth and low in detail.
pub fn ramp(w: u32, h: u32) -> GrayImage {
    GrayImage::from_fn(w, h, |x, _| Luma([(x * 255 / w.max(1)) as u8]))
}
