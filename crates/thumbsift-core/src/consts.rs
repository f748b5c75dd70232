/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Width every frame is resampled to before edge detection. Storyboard tiles
/// and thumbnails come in mixed sizes; edge maps must share a shape to diff.
pub const DEFAULT_WORKING_WIDTH: u32 = 160;

/// Height every frame is resampled to before edge detection.
pub const DEFAULT_WORKING_HEIGHT: u32 = 90;

/// Loose upper bound on frames pulled out of a storyboard.
pub const DEFAULT_FRAME_LIMIT: usize = 50;

/// Keyword score assigned when a platform category shortcut fires.
pub const DEFAULT_SHORTCUT_BOOST: u32 = 1000;

/// Labels produced by the default image classifier, in output order.
pub const DEFAULT_CLASS_NAMES: [&str; 7] = [
    "graphics",
    "lowLight",
    "nature",
    "news",
    "person",
    "sports",
    "textHeavy",
];
