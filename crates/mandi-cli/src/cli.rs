//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use mandi_domain::VoteDirection;
use std::path::PathBuf;

/// Mandi CLI - Find and rate suppliers from community reviews.
#[derive(Debug, Parser)]
#[command(name = "mandi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MANDI_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, global = true, env = "MANDI_DB")]
    pub db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names and ids only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect the supplier named in a piece of review text
    Detect(DetectArgs),

    /// Suggest a supplier name while a post is being typed
    Hint(HintArgs),

    /// Publish a new post
    Post(PostArgs),

    /// Import posts and suppliers from a JSON file
    Import(ImportArgs),

    /// Promote corroborated suppliers from the post corpus
    Scan(ScanArgs),

    /// List suppliers with their trust scores
    Suppliers(SuppliersArgs),

    /// Show posts, nearest first
    Feed(FeedArgs),

    /// Vote on a post or supplier (same direction again retracts)
    Vote(VoteArgs),

    /// Show activity statistics for one supplier
    Stats(StatsArgs),

    /// Keep re-scanning in the background until Ctrl+C
    Watch(WatchArgs),
}

/// Arguments for the detect command.
#[derive(Debug, Parser)]
pub struct DetectArgs {
    /// Review text
    pub text: String,

    /// Category of goods (vegetables, spices, oil, packaging, dairy, meat)
    #[arg(long)]
    pub category: Option<String>,

    /// List every tier's candidate instead of the winner
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the hint command.
#[derive(Debug, Parser)]
pub struct HintArgs {
    /// Partial post text
    pub text: String,
}

/// Arguments for the post command.
#[derive(Debug, Parser)]
pub struct PostArgs {
    /// Review text
    pub content: String,

    /// Category of goods
    #[arg(long)]
    pub category: Option<String>,

    /// Author display name
    #[arg(short, long)]
    pub author: String,

    /// Author identity (defaults to settings.user, then the lowercased name)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Latitude (defaults to home)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude (defaults to home)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Area label
    #[arg(long)]
    pub area: Option<String>,

    /// City label
    #[arg(long)]
    pub city: Option<String>,

    /// Street address or landmark
    #[arg(long, default_value = "")]
    pub address: String,

    /// Do not run a promotion pass after publishing
    #[arg(long)]
    pub no_scan: bool,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file with `posts` and/or `suppliers` arrays
    #[arg(short = 'i', long)]
    pub file: Option<PathBuf>,

    /// Read JSON from stdin
    #[arg(long, conflicts_with = "file")]
    pub stdin: bool,

    /// Run a promotion pass after importing
    #[arg(long)]
    pub scan: bool,
}

/// Threshold presets.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Preset {
    /// Configured thresholds
    Default,
    /// Fewer, more certain promotions
    Strict,
    /// More promotions, including location-only mentions
    Lenient,
}

/// Arguments for the scan command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Report what would be promoted without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Replace the configured thresholds with a preset
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,
}

/// Arguments for the suppliers command.
#[derive(Debug, Parser)]
pub struct SuppliersArgs {
    /// Only suppliers in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Match name or category (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort nearest first
    #[arg(short, long)]
    pub near: bool,

    /// Origin latitude (defaults to home)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Origin longitude (defaults to home)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

/// Arguments for the feed command.
#[derive(Debug, Parser)]
pub struct FeedArgs {
    /// Only posts in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Maximum number of posts
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Origin latitude (defaults to home)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Origin longitude (defaults to home)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

/// What a vote is cast on.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetKind {
    Post,
    Supplier,
}

/// Vote direction.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliDirection {
    Up,
    Down,
}

impl From<CliDirection> for VoteDirection {
    fn from(direction: CliDirection) -> Self {
        match direction {
            CliDirection::Up => VoteDirection::Up,
            CliDirection::Down => VoteDirection::Down,
        }
    }
}

/// Arguments for the vote command.
#[derive(Debug, Parser)]
pub struct VoteArgs {
    /// Target kind
    #[arg(value_enum)]
    pub kind: TargetKind,

    /// Post or supplier id
    pub id: String,

    /// Direction
    #[arg(value_enum)]
    pub direction: CliDirection,

    /// Voter identity (defaults to settings.user)
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Supplier name (case-insensitive)
    pub name: String,
}

/// Arguments for the watch command.
#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// Seconds between passes (overrides the config)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Stop after this many passes
    #[arg(long)]
    pub cycles: Option<usize>,

    /// Report what would be promoted without writing
    #[arg(long)]
    pub dry_run: bool,
}
