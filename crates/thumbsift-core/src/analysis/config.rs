use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CLASS_NAMES, DEFAULT_SHORTCUT_BOOST};
use crate::io::storyboard::StoryboardConfig;
use crate::keywords::KeywordConfig;
use crate::pipeline::SelectionConfig;

/// Top-level configuration, usually loaded from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Labels for the zero-filled category map when the classifier handle
    /// does not report its own.
    pub class_names: Vec<String>,
    pub selection: SelectionConfig,
    pub storyboard: Option<StoryboardConfig>,
    pub shortcuts: Vec<CategoryShortcut>,
    pub keywords: KeywordConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            class_names: DEFAULT_CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
            selection: SelectionConfig::default(),
            storyboard: Some(StoryboardConfig::default()),
            shortcuts: CategoryShortcut::defaults(),
            keywords: KeywordConfig::default(),
        }
    }
}

/// Platform-category rule that settles a video without looking at frames.
///
/// When the video's category contains `category_contains` (case-insensitive),
/// `keyword_category` is scored `boost` and frame analysis is skipped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryShortcut {
    pub category_contains: String,
    pub keyword_category: String,
    #[serde(default = "default_boost")]
    pub boost: u32,
}

fn default_boost() -> u32 {
    DEFAULT_SHORTCUT_BOOST
}

impl CategoryShortcut {
    pub fn new(category_contains: &str, keyword_category: &str) -> Self {
        Self {
            category_contains: category_contains.to_string(),
            keyword_category: keyword_category.to_string(),
            boost: DEFAULT_SHORTCUT_BOOST,
        }
    }

    /// `music` and `gaming`.
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("music", "music"), Self::new("gaming", "gaming")]
    }

    pub fn matches(&self, category: &str) -> bool {
        !self.category_contains.is_empty()
            && category
                .to_lowercase()
                .contains(&self.category_contains.to_lowercase())
    }
}
