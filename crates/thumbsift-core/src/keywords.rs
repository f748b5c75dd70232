//! Whole-word keyword scoring of a video's text metadata.

use std::collections::HashSet;
use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::{Result, ThumbsiftError};

/// Text fields of one video. Every field takes part in keyword matching.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoText {
    pub title: String,
    pub description: String,
    pub category: String,
    pub channel_id: String,
}

impl VideoText {
    /// All fields joined by single spaces.
    pub fn concatenated(&self) -> String {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            self.channel_id.as_str(),
        ]
        .join(" ")
    }
}

/// Ordered category -> keywords table.
///
/// Deserialises from a JSON object or TOML table whose values are lists of
/// strings, keeping the document's category order. Duplicate categories and
/// empty keywords are rejected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeywordConfig {
    categories: Vec<(String, Vec<String>)>,
}

impl KeywordConfig {
    pub fn new<C, K>(entries: impl IntoIterator<Item = (C, Vec<K>)>) -> Result<Self>
    where
        C: Into<String>,
        K: Into<String>,
    {
        let mut config = Self::default();
        for (category, keywords) in entries {
            config
                .push(category.into(), keywords.into_iter().map(Into::into).collect())
                .map_err(ThumbsiftError::InvalidConfig)?;
        }
        Ok(config)
    }

    /// Parse a JSON object such as `{"nature": ["forest", "river"]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ThumbsiftError::InvalidConfig(e.to_string()))
    }

    fn push(
        &mut self,
        category: String,
        keywords: Vec<String>,
    ) -> std::result::Result<(), String> {
        if self.categories.iter().any(|(c, _)| *c == category) {
            return Err(format!("duplicate category `{category}`"));
        }
        if keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(format!("empty keyword in category `{category}`"));
        }
        self.categories.push((category, keywords));
        Ok(())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(c, _)| c.as_str())
    }

    pub fn keywords(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, k)| k.as_slice())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for KeywordConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (category, keywords) in &self.categories {
            map.serialize_entry(category, keywords)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeywordConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = KeywordConfig;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category names to lists of keywords")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut config = KeywordConfig::default();
                while let Some(category) = access.next_key::<String>()? {
                    let keywords = access.next_value::<Vec<String>>()?;
                    config.push(category, keywords).map_err(de::Error::custom)?;
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(ConfigVisitor)
    }
}

/// Per-category count of distinct keywords that matched, in configuration
/// order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeywordScoreMap {
    scores: Vec<(String, u32)>,
}

impl KeywordScoreMap {
    pub fn get(&self, category: &str) -> Option<u32> {
        self.scores
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, s)| *s)
    }

    /// Overwrite a category's score, appending the category if it is new.
    pub fn set(&mut self, category: &str, score: u32) {
        match self.scores.iter_mut().find(|(c, _)| c == category) {
            Some((_, s)) => *s = score,
            None => self.scores.push((category.to_string(), score)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(c, s)| (c.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Serialize for KeywordScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for (category, score) in &self.scores {
            map.serialize_entry(category, score)?;
        }
        map.end()
    }
}

/// Compiled matcher for a [`KeywordConfig`].
///
/// A keyword matches when it appears case-insensitively with a non-word
/// character or the start/end of the text on both sides, so `forest` does not
/// match inside `forestry`. Keywords are literal text; `c++` means `c++`.
pub struct KeywordScorer {
    categories: Vec<(String, Vec<Regex>)>,
}

impl KeywordScorer {
    pub fn new(config: &KeywordConfig) -> Result<Self> {
        let categories = config
            .categories
            .iter()
            .map(|(category, keywords)| {
                let mut seen = HashSet::new();
                let patterns = keywords
                    .iter()
                    .filter(|k| seen.insert(k.trim().to_lowercase()))
                    .map(|k| whole_word_pattern(k))
                    .collect::<Result<Vec<_>>>()?;
                Ok((category.clone(), patterns))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { categories })
    }

    pub fn score(&self, text: &VideoText) -> KeywordScoreMap {
        self.score_str(&text.concatenated())
    }

    pub fn score_str(&self, text: &str) -> KeywordScoreMap {
        let scores = self
            .categories
            .iter()
            .map(|(category, patterns)| {
                let hits = patterns.iter().filter(|p| p.is_match(text)).count() as u32;
                debug!(category = %category, hits, "Keyword category scored");
                (category.clone(), hits)
            })
            .collect();
        KeywordScoreMap { scores }
    }
}

fn whole_word_pattern(keyword: &str) -> Result<Regex> {
    let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(keyword.trim()));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ThumbsiftError::InvalidConfig(format!("keyword `{keyword}`: {e}")))
}
