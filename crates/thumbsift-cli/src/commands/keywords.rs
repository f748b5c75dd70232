use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use thumbsift_core::io::info_json::parse_info_json;
use thumbsift_core::keywords::{KeywordConfig, KeywordScorer};

use super::config::load_config;

#[derive(Args)]
pub struct KeywordsArgs {
    /// Keyword configuration: a JSON object, or a TOML config with a [keywords] table
    #[arg(long)]
    pub config: PathBuf,

    /// Text to score
    #[arg(long, conflicts_with = "info", required_unless_present = "info")]
    pub text: Option<String>,

    /// yt-dlp style .info.json file to score
    #[arg(long)]
    pub info: Option<PathBuf>,

    /// Print scores as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &KeywordsArgs) -> Result<()> {
    let keywords = load_keywords(&args.config)?;
    let scorer = KeywordScorer::new(&keywords)?;

    let scores = match (&args.text, &args.info) {
        (Some(text), _) => scorer.score_str(text),
        (None, Some(path)) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let text = parse_info_json(&json)
                .with_context(|| format!("Invalid metadata in {}", path.display()))?;
            scorer.score(&text)
        }
        (None, None) => anyhow::bail!("Either --text or --info is required"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    println!("{:<20}  {:>6}", "Category", "Score");
    println!("{}", "-".repeat(28));
    for (category, score) in scores.iter() {
        println!("{:<20}  {:>6}", category, score);
    }

    Ok(())
}

/// JSON files hold a bare keyword map; anything else is read as a full TOML
/// config and its `[keywords]` table is used.
fn load_keywords(path: &Path) -> Result<KeywordConfig> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read keywords {}", path.display()))?;
        KeywordConfig::from_json_str(&contents)
            .with_context(|| format!("Invalid keywords in {}", path.display()))
    } else {
        Ok(load_config(Some(path))?.keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_keywords_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("keywords.json");
        std::fs::write(&json, r#"{"nature": ["forest"], "coding": ["rust"]}"#).unwrap();
        let from_json = load_keywords(&json).unwrap();
        assert_eq!(from_json.categories().collect::<Vec<_>>(), ["nature", "coding"]);

        let toml = dir.path().join("thumbsift.toml");
        std::fs::write(&toml, "[keywords]\nnature = [\"forest\"]\n").unwrap();
        let from_toml = load_keywords(&toml).unwrap();
        assert_eq!(from_toml.keywords("nature").unwrap(), ["forest".to_string()]);
    }

    #[test]
    fn test_load_keywords_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("keywords.json");
        std::fs::write(&json, r#"{"nature": "forest"}"#).unwrap();
        assert!(load_keywords(&json).is_err());
    }
}
