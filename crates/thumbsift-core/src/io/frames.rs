use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use ndarray::Array2;
use tracing::{debug, warn};

use crate::analysis::FrameSource;
use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::Result;
use crate::frame::RawImage;

use super::storyboard::{extract_frames, StoryboardConfig};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "bmp", "tiff"];

/// Decode an encoded image into BT.601 luminance on a 0-255 scale, shape
/// `(height, width)`. With `working_size` the image is first resampled to
/// exactly that size.
pub fn decode_luminance(bytes: &[u8], working_size: Option<(u32, u32)>) -> Result<Array2<f32>> {
    let img = image::load_from_memory(bytes)?;
    let img = match working_size {
        Some((w, h)) if img.width() != w || img.height() != h => {
            img.resize_exact(w, h, FilterType::Triangle)
        }
        _ => img,
    };

    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));
    for (col, row, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        data[[row as usize, col as usize]] =
            LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    }
    Ok(data)
}

/// Encode a decoded image as PNG.
pub fn encode_png(img: &DynamicImage) -> Result<RawImage> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(RawImage::from(buf.into_inner()))
}

/// Read an image file's bytes without decoding them.
pub fn load_raw_image(path: &Path) -> Result<RawImage> {
    Ok(RawImage::from(std::fs::read(path)?))
}

/// Decode a raw frame and save it, choosing format from file extension.
pub fn save_raw_image(image: &RawImage, path: &Path) -> Result<()> {
    image::load_from_memory(image.as_bytes())?.save(path)?;
    Ok(())
}

/// Image files directly inside `dir`, sorted by file name.
pub fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && is_image {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every image in `dir` as a frame. With a storyboard layout each file
/// is treated as a sheet and split into its tiles.
///
/// Files that cannot be read, or in plain mode cannot be decoded, are logged
/// and skipped so one corrupt fragment does not sink the whole video. A
/// missing or unreadable directory is still an error.
pub fn load_frames(dir: &Path, storyboard: Option<&StoryboardConfig>) -> Result<Vec<RawImage>> {
    let files = list_image_files(dir)?;
    let mut loaded = Vec::with_capacity(files.len());
    for path in files {
        match load_raw_image(&path) {
            Ok(image) => loaded.push((path, image)),
            Err(e) => warn!(file = %path.display(), error = %e, "Skipping unreadable frame file"),
        }
    }
    debug!(dir = %dir.display(), files = loaded.len(), "Loaded frame files");

    match storyboard {
        Some(layout) => {
            let sheets: Vec<RawImage> = loaded.into_iter().map(|(_, image)| image).collect();
            extract_frames(&sheets, layout)
        }
        None => Ok(loaded
            .into_iter()
            .filter_map(|(path, image)| match image::load_from_memory(image.as_bytes()) {
                Ok(_) => Some(image),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Skipping undecodable frame");
                    None
                }
            })
            .collect()),
    }
}

/// Frame source reading `<root>/<video_id>/` from the local filesystem.
#[derive(Clone, Debug)]
pub struct DirectoryFrameSource {
    root: PathBuf,
    storyboard: Option<StoryboardConfig>,
}

impl DirectoryFrameSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            storyboard: None,
        }
    }

    /// Treat every file as a storyboard sheet with this layout.
    pub fn with_storyboard(mut self, layout: StoryboardConfig) -> Self {
        self.storyboard = Some(layout);
        self
    }
}

impl FrameSource for DirectoryFrameSource {
    fn fetch_frames(&self, video_id: &str) -> Result<Vec<RawImage>> {
        load_frames(&self.root.join(video_id), self.storyboard.as_ref())
    }
}
