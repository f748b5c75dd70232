use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use thumbsift_core::consts::DEFAULT_FRAME_LIMIT;
use thumbsift_core::io::frames::{load_frames, save_raw_image};
use thumbsift_core::io::storyboard::StoryboardConfig;
use thumbsift_core::pipeline::FrameSelectionPipeline;
use tracing::info;

use super::config::load_config;
use crate::progress::BarProgressReporter;

#[derive(Args)]
pub struct SelectArgs {
    /// Directory of frame images, or of storyboard sheets with --columns/--rows
    pub dir: PathBuf,

    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Storyboard tiles per row; every file is split as a sheet
    #[arg(long, requires = "rows")]
    pub columns: Option<u32>,

    /// Storyboard tiles per column
    #[arg(long, requires = "columns")]
    pub rows: Option<u32>,

    /// Approximate maximum number of frames taken from storyboard sheets
    #[arg(long)]
    pub frame_limit: Option<usize>,

    /// Save the selected frame to this path
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Print the selection as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &SelectArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    // Sheets are only split when asked for on the command line or in an
    // explicit config file.
    let storyboard = match (args.columns, args.rows) {
        (Some(columns), Some(rows)) => Some(StoryboardConfig {
            columns,
            rows,
            frame_limit: args.frame_limit.unwrap_or(DEFAULT_FRAME_LIMIT),
        }),
        _ if args.config.is_some() => config.storyboard.clone(),
        _ => None,
    };

    let frames = load_frames(&args.dir, storyboard.as_ref())
        .with_context(|| format!("Failed to load frames from {}", args.dir.display()))?;

    let pipeline =
        FrameSelectionPipeline::with_config(config.selection.detector(), config.selection.clone());
    let reporter = BarProgressReporter::new()?;
    let selection = pipeline.select_reported(&frames, &reporter);
    reporter.finish();
    let selection = selection.context("Frame selection failed")?;

    if let Some(ref path) = args.save {
        save_raw_image(&frames[selection.selected_index], path)
            .with_context(|| format!("Failed to save frame to {}", path.display()))?;
        info!(path = %path.display(), index = selection.selected_index, "Selected frame saved");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&selection)?);
    } else {
        crate::summary::print_selection_summary(
            &args.dir,
            frames.len(),
            storyboard.as_ref(),
            &selection,
        );
        if let Some(ref path) = args.save {
            println!("\nSelected frame saved to {}", path.display());
        }
    }

    Ok(())
}
