//! Storyboard sheets: grids of equally sized thumbnails taken at regular
//! intervals through a video.

use image::{DynamicImage, GenericImageView};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{DEFAULT_FRAME_LIMIT, PARALLEL_FRAME_THRESHOLD};
use crate::error::{Result, ThumbsiftError};
use crate::frame::RawImage;

use super::frames::encode_png;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryboardConfig {
    pub columns: u32,
    pub rows: u32,
    /// Loose upper bound on extracted frames; whole sheets are skipped to
    /// stay near it.
    #[serde(default = "default_frame_limit")]
    pub frame_limit: usize,
}

fn default_frame_limit() -> usize {
    DEFAULT_FRAME_LIMIT
}

impl Default for StoryboardConfig {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 5,
            frame_limit: DEFAULT_FRAME_LIMIT,
        }
    }
}

impl StoryboardConfig {
    pub fn tiles_per_sheet(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Keep every `step`-th sheet, `step = tiles * sheets / frame_limit`, at least 1.
pub fn sheet_step(layout: &StoryboardConfig, sheets: usize) -> usize {
    let total = layout.tiles_per_sheet() * sheets;
    (total / layout.frame_limit.max(1)).max(1)
}

/// Cut a sheet into `columns x rows` tiles, row-major. Any remainder pixels
/// on the right and bottom edges are ignored.
pub fn split_sheet(sheet: &DynamicImage, columns: u32, rows: u32) -> Result<Vec<DynamicImage>> {
    let (width, height) = sheet.dimensions();
    let tile_w = if columns == 0 { 0 } else { width / columns };
    let tile_h = if rows == 0 { 0 } else { height / rows };
    if tile_w == 0 || tile_h == 0 {
        return Err(ThumbsiftError::InvalidDimensions { width, height });
    }

    let mut tiles = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for col in 0..columns {
            tiles.push(sheet.crop_imm(col * tile_w, row * tile_h, tile_w, tile_h));
        }
    }
    Ok(tiles)
}

/// Sample sheets by [`sheet_step`], split each into tiles and re-encode the
/// tiles as PNG frames, preserving sheet then tile order.
///
/// A sheet that cannot be decoded or split is logged and skipped; the
/// remaining sheets still contribute their tiles.
pub fn extract_frames(sheets: &[RawImage], layout: &StoryboardConfig) -> Result<Vec<RawImage>> {
    let step = sheet_step(layout, sheets.len());
    let sampled: Vec<(usize, &RawImage)> = sheets.iter().enumerate().step_by(step).collect();

    let split = |&(index, sheet): &(usize, &RawImage)| -> Option<Vec<RawImage>> {
        match split_raw_sheet(sheet, layout) {
            Ok(tiles) => Some(tiles),
            Err(e) => {
                warn!(sheet = index, error = %e, "Skipping unreadable storyboard sheet");
                None
            }
        }
    };

    let per_sheet: Vec<Option<Vec<RawImage>>> = if sampled.len() >= PARALLEL_FRAME_THRESHOLD {
        sampled.par_iter().map(split).collect()
    } else {
        sampled.iter().map(split).collect()
    };

    let frames: Vec<RawImage> = per_sheet.into_iter().flatten().flatten().collect();
    debug!(
        sheets = sheets.len(),
        sampled = sampled.len(),
        step,
        frames = frames.len(),
        "Storyboard split"
    );
    Ok(frames)
}

fn split_raw_sheet(sheet: &RawImage, layout: &StoryboardConfig) -> Result<Vec<RawImage>> {
    let decoded = image::load_from_memory(sheet.as_bytes())?;
    split_sheet(&decoded, layout.columns, layout.rows)?
        .iter()
        .map(encode_png)
        .collect()
}
