#[allow(dead_code)]
mod common;

use std::fs;
use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, Luma};

use thumbsift_core::analysis::{FrameSource, TextSource};
use thumbsift_core::error::ThumbsiftError;
use thumbsift_core::frame::RawImage;
use thumbsift_core::io::frames::{
    list_image_files, load_frames, load_raw_image, save_raw_image, DirectoryFrameSource,
};
use thumbsift_core::io::info_json::{parse_info_json, InfoJsonTextSource};
use thumbsift_core::io::storyboard::{extract_frames, sheet_step, split_sheet, StoryboardConfig};

use common::{checkerboard, flat, png};

/// Sheet of `columns x rows` flat 10x10 tiles; tile `n` (row-major) has value `n * 10`.
fn numbered_sheet(columns: u32, rows: u32) -> GrayImage {
    GrayImage::from_fn(columns * 10, rows * 10, |x, y| {
        let n = (y / 10) * columns + x / 10;
        Luma([(n * 10) as u8])
    })
}

fn first_luma(bytes: &[u8]) -> u8 {
    image::load_from_memory(bytes).unwrap().to_luma8().get_pixel(0, 0).0[0]
}

fn write_png(path: &Path, img: GrayImage) {
    fs::write(path, png(img).as_bytes()).unwrap();
}

fn layout(columns: u32, rows: u32, frame_limit: usize) -> StoryboardConfig {
    StoryboardConfig {
        columns,
        rows,
        frame_limit,
    }
}

// ---------------------------------------------------------------------------
// Storyboard
// ---------------------------------------------------------------------------

#[test]
fn test_split_sheet_row_major() {
    let sheet = DynamicImage::ImageLuma8(numbered_sheet(5, 3));
    let tiles = split_sheet(&sheet, 5, 3).unwrap();
    assert_eq!(tiles.len(), 15);
    for (n, tile) in tiles.iter().enumerate() {
        assert_eq!(tile.dimensions(), (10, 10));
        assert_eq!(tile.to_luma8().get_pixel(5, 5).0[0], (n * 10) as u8);
    }
}

#[test]
fn test_split_sheet_ignores_remainder() {
    let sheet = DynamicImage::ImageLuma8(flat(53, 31, 7));
    let tiles = split_sheet(&sheet, 5, 3).unwrap();
    assert_eq!(tiles[0].dimensions(), (10, 10));
}

#[test]
fn test_split_sheet_too_small() {
    let sheet = DynamicImage::ImageLuma8(flat(4, 4, 0));
    assert!(matches!(
        split_sheet(&sheet, 5, 5),
        Err(ThumbsiftError::InvalidDimensions { width: 4, height: 4 })
    ));
    assert!(split_sheet(&sheet, 0, 1).is_err());
}

#[test]
fn test_sheet_step() {
    assert_eq!(sheet_step(&StoryboardConfig::default(), 10), 5);
    assert_eq!(sheet_step(&StoryboardConfig::default(), 1), 1);
    assert_eq!(sheet_step(&layout(5, 3, 20), 3), 2);
    assert_eq!(sheet_step(&layout(5, 5, 0), 2), 50);
}

#[test]
fn test_extract_frames_keeps_order() {
    let sheets: Vec<_> = (0..3).map(|_| png(numbered_sheet(5, 3))).collect();
    let frames = extract_frames(&sheets, &layout(5, 3, 50)).unwrap();
    assert_eq!(frames.len(), 45);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(first_luma(frame.as_bytes()), ((i % 15) * 10) as u8);
    }
}

#[test]
fn test_extract_frames_samples_sheets() {
    let sheets: Vec<_> = (0..5u8)
        .map(|s| png(flat(20, 20, s * 40)))
        .collect();
    // 5 sheets x 4 tiles = 20 frames against a limit of 8: every 2nd sheet.
    let frames = extract_frames(&sheets, &layout(2, 2, 8)).unwrap();
    assert_eq!(frames.len(), 12);
    let sheet_values: Vec<u8> = frames
        .chunks(4)
        .map(|tiles| first_luma(tiles[0].as_bytes()))
        .collect();
    assert_eq!(sheet_values, vec![0, 80, 160]);
}

#[test]
fn test_extract_frames_skips_bad_sheet() {
    let sheets = vec![
        png(numbered_sheet(2, 2)),
        RawImage::from(vec![0u8; 4]),
        png(numbered_sheet(2, 2)),
    ];
    let frames = extract_frames(&sheets, &layout(2, 2, 50)).unwrap();
    assert_eq!(frames.len(), 8);
    let values: Vec<u8> = frames.iter().map(|f| first_luma(f.as_bytes())).collect();
    assert_eq!(values, vec![0, 10, 20, 30, 0, 10, 20, 30]);
}

#[test]
fn test_extract_frames_all_bad_is_empty() {
    let sheets = vec![RawImage::from(vec![0u8; 8])];
    let frames = extract_frames(&sheets, &StoryboardConfig::default()).unwrap();
    assert!(frames.is_empty());
}

// ---------------------------------------------------------------------------
// Frame files
// ---------------------------------------------------------------------------

#[test]
fn test_list_image_files_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("b.png"), flat(8, 8, 1));
    write_png(&dir.path().join("a.PNG"), flat(8, 8, 2));
    fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
    fs::create_dir(dir.path().join("nested.png")).unwrap();

    let files = list_image_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.PNG", "b.png"]);
}

#[test]
fn test_load_frames_plain() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("frame_01.png"), flat(8, 8, 10));
    write_png(&dir.path().join("frame_00.png"), flat(8, 8, 20));

    let frames = load_frames(dir.path(), None).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(first_luma(frames[0].as_bytes()), 20);
    assert_eq!(first_luma(frames[1].as_bytes()), 10);
}

#[test]
fn test_load_frames_skips_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("frame_00.png"), flat(8, 8, 20));
    fs::write(dir.path().join("frame_01.png"), [1u8, 2, 3]).unwrap();
    write_png(&dir.path().join("frame_02.png"), flat(8, 8, 40));

    let frames = load_frames(dir.path(), None).unwrap();
    let values: Vec<u8> = frames.iter().map(|f| first_luma(f.as_bytes())).collect();
    assert_eq!(values, vec![20, 40]);

    let tiled = load_frames(dir.path(), Some(&layout(2, 2, 50))).unwrap();
    assert_eq!(tiled.len(), 8);
}

#[test]
fn test_load_frames_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_frames(&dir.path().join("absent"), None);
    assert!(matches!(result, Err(ThumbsiftError::Io(_))));
}

#[test]
fn test_raw_image_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.png");
    write_png(&path, checkerboard(12, 6, 2, 0));

    let raw = load_raw_image(&path).unwrap();
    let out = dir.path().join("out.png");
    save_raw_image(&raw, &out).unwrap();

    let reloaded = image::open(&out).unwrap();
    assert_eq!(reloaded.dimensions(), (12, 6));
}

#[test]
fn test_directory_frame_source() {
    let root = tempfile::tempdir().unwrap();
    let video = root.path().join("abc123");
    fs::create_dir(&video).unwrap();
    write_png(&video.join("M0.png"), numbered_sheet(2, 2));
    write_png(&video.join("M1.png"), numbered_sheet(2, 2));

    let plain = DirectoryFrameSource::new(root.path());
    assert_eq!(plain.fetch_frames("abc123").unwrap().len(), 2);

    let tiled = DirectoryFrameSource::new(root.path()).with_storyboard(layout(2, 2, 50));
    let frames = tiled.fetch_frames("abc123").unwrap();
    assert_eq!(frames.len(), 8);
    assert_eq!(first_luma(frames[3].as_bytes()), 30);

    assert!(plain.fetch_frames("missing").is_err());
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[test]
fn test_parse_info_json_categories_list() {
    let text = parse_info_json(
        r#"{
            "id": "abc123",
            "title": "River walk",
            "description": "Forest trail",
            "categories": ["Travel & Events", "People & Blogs"],
            "category": "ignored",
            "channel_id": "UCxyz",
            "duration": 321
        }"#,
    )
    .unwrap();
    assert_eq!(text.title, "River walk");
    assert_eq!(text.description, "Forest trail");
    assert_eq!(text.category, "Travel & Events");
    assert_eq!(text.channel_id, "UCxyz");
}

#[test]
fn test_parse_info_json_sparse() {
    let text = parse_info_json(r#"{"title": "Only a title", "category": "Music"}"#).unwrap();
    assert_eq!(text.category, "Music");
    assert_eq!(text.description, "");
    assert_eq!(text.channel_id, "");

    let text = parse_info_json(r#"{"description": null}"#).unwrap();
    assert_eq!(text, Default::default());
}

#[test]
fn test_parse_info_json_invalid() {
    assert!(matches!(
        parse_info_json("{ not json"),
        Err(ThumbsiftError::Json(_))
    ));
}

#[test]
fn test_info_json_text_source() {
    let root = tempfile::tempdir().unwrap();
    fs::write(
        root.path().join("abc123.info.json"),
        r#"{"title": "Gaming night", "categories": ["Gaming"]}"#,
    )
    .unwrap();

    let source = InfoJsonTextSource::new(root.path());
    let text = source.fetch_text("abc123").unwrap();
    assert_eq!(text.title, "Gaming night");
    assert_eq!(text.category, "Gaming");
    assert!(matches!(
        source.fetch_text("other"),
        Err(ThumbsiftError::Io(_))
    ));
}
