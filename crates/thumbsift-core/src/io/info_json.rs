use std::path::PathBuf;

use serde::Deserialize;

use crate::analysis::TextSource;
use crate::error::Result;
use crate::keywords::VideoText;

/// Subset of a yt-dlp `.info.json` document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InfoJson {
    title: String,
    description: Option<String>,
    categories: Vec<String>,
    category: Option<String>,
    channel_id: Option<String>,
}

/// Parse a yt-dlp style metadata document. The first entry of `categories`
/// wins over a plain `category` field.
pub fn parse_info_json(json: &str) -> Result<VideoText> {
    let info: InfoJson = serde_json::from_str(json)?;
    let category = info
        .categories
        .into_iter()
        .next()
        .or(info.category)
        .unwrap_or_default();

    Ok(VideoText {
        title: info.title,
        description: info.description.unwrap_or_default(),
        category,
        channel_id: info.channel_id.unwrap_or_default(),
    })
}

/// Text source reading `<root>/<video_id>.info.json`.
#[derive(Clone, Debug)]
pub struct InfoJsonTextSource {
    root: PathBuf,
}

impl InfoJsonTextSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextSource for InfoJsonTextSource {
    fn fetch_text(&self, video_id: &str) -> Result<VideoText> {
        let path = self.root.join(format!("{video_id}.info.json"));
        parse_info_json(&std::fs::read_to_string(path)?)
    }
}
