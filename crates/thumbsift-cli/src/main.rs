mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "thumbsift", about = "Representative frame and keyword scoring for videos")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick the representative frame from a directory of frames
    Select(commands::select::SelectArgs),
    /// Score text against a keyword configuration
    Keywords(commands::keywords::KeywordsArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Select(args) => commands::select::run(args),
        Commands::Keywords(args) => commands::keywords::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
