//! Command-line argument definitions
//!
//! This module defines all CLI arguments using clap.

use clap::Parser;
use std::path::PathBuf;

/// A standalone file-deduplication index service
#[derive(Parser, Debug)]
#[command(name = "dedup-indexer")]
#[command(version)]
#[command(
    about = "Crawl directory trees into a size/hash index and answer dedup queries over TCP",
    long_about = None
)]
pub struct Args {
    /// Directories that will be crawled into the index
    #[arg(value_name = "DIR")]
    pub directories: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// TCP port on which the query server listens (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind the query server to (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Follow symbolic links while crawling (overrides config)
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Maximum crawl depth below each root (overrides config)
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Only index files with this extension (can be repeated; overrides config)
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long)]
    pub log_level: Option<String>,
}
