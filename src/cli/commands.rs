//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lazy cursor pagination over listing endpoints
#[derive(Parser, Debug)]
#[command(name = "listing-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the items of a listing
    Fetch {
        /// Listing path or full URL (e.g. /r/rust/new.json)
        path: String,

        /// Maximum number of items (defaults to the configured limit)
        #[arg(short, long, conflicts_with = "all")]
        limit: Option<usize>,

        /// Keep paging until the server has no more items
        #[arg(long)]
        all: bool,

        /// Extra query parameter, repeatable (e.g. -p t=week)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}
