//! Filesystem crawling
//!
//! # Submodules
//!
//! - `walker` - Cooperative recursive directory traversal

pub mod walker;

pub use walker::{walk, CrawlOptions};
