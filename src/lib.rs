//! Dedup Indexer Library
//!
//! A standalone file-deduplication index service: it recursively scans one
//! or more directory trees, builds an in-memory content-addressable index
//! keyed first by file size and lazily by content hash, and answers point
//! queries over a simple line-based TCP protocol.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`core`] - Configuration and error handling
//! - [`index`] - Content hashing and the size/hash index
//! - [`crawl`] - Cooperative recursive directory traversal
//! - [`server`] - The TCP query server and wire protocol
//! - [`cli`] - Command-line interface (only used by the binary)
//!
//! # Concurrency model
//!
//! Everything runs on one single-threaded cooperative scheduler (a tokio
//! current-thread runtime with a `LocalSet`): crawl steps, index mutation,
//! session reads/writes, and connection acceptance all interleave on the
//! loop thread. The index is shared as [`index::SharedIndex`]: plain
//! reference counting with interior mutability, no locks or atomics. The
//! only blocking work on the loop is hashing a file and reading its
//! metadata, an accepted head-of-line-latency tradeoff: a size seen only
//! once is never hashed at all.
//!
//! # Example
//!
//! ```rust,no_run
//! use dedup_indexer::crawl::{walk, CrawlOptions};
//! use dedup_indexer::index::{FileIndex, Sha256Hasher, SharedIndex};
//! use dedup_indexer::server::QueryServer;
//! use std::cell::RefCell;
//! use std::path::Path;
//! use std::rc::Rc;
//!
//! async fn serve() -> std::io::Result<()> {
//!     let index: SharedIndex<Sha256Hasher> = Rc::new(RefCell::new(FileIndex::new()));
//!
//!     let crawl_index = index.clone();
//!     tokio::task::spawn_local(async move {
//!         walk(
//!             Path::new("/data/photos"),
//!             &CrawlOptions::default(),
//!             |entry| entry.file_type().is_file(),
//!             |entry| {
//!                 let _ = crawl_index.borrow_mut().push(entry.path());
//!             },
//!         )
//!         .await;
//!     });
//!
//!     let server = QueryServer::bind(([127, 0, 0, 1], 54321).into(), index).await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod crawl;
pub mod index;
pub mod server;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
