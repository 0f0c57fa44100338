//! CLI module for the dedup indexer
//!
//! # Submodules
//!
//! - `args` - Command-line argument definitions using clap

pub mod args;

pub use args::Args;
