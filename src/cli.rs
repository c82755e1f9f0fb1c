use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum, PartialEq, Eq)]
pub enum Mode {
    /// Download the subtitle that best matches each video
    Best,
    /// List every subtitle available for each video
    All,
}

#[derive(Parser)]
#[command(name = "subtitle-finder")]
#[command(about = "Find and download the best matching Addic7ed subtitle for video files")]
pub struct Cli {
    /// Video files to find subtitles for
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Subtitle language as named on the site (defaults to the configured language)
    #[arg(short = 'l', long = "lang")]
    pub language: Option<String>,

    /// What to do with the found subtitles
    #[arg(long, default_value = "best")]
    pub mode: Mode,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the selected subtitle without downloading it
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite existing subtitle files without asking
    #[arg(long)]
    pub no_confirm: bool,

    /// Add the language to the subtitle file name (video.English.srt)
    #[arg(long)]
    pub language_suffix: bool,

    /// Log the search and scoring steps
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
