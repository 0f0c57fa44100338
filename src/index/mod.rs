//! Content-addressable file index
//!
//! This module contains the core data structure of the service: a map from
//! file size to either a single path or a digest→path map, populated by the
//! crawler and queried by the server.
//!
//! # Submodules
//!
//! - `hasher` - Streaming content digests and hex helpers
//! - `store` - The size/hash index with `push` and `pull`

pub mod hasher;
pub mod store;

pub use hasher::{digest_to_hex, ContentHasher, Sha256Hasher, Sha512Hasher};
pub use store::{FileIndex, Slot};

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the index, cloned into crawler and session tasks.
///
/// The whole service runs on one single-threaded scheduler, so plain
/// reference counting with interior mutability is sufficient; borrows are
/// never held across an await point.
pub type SharedIndex<H> = Rc<RefCell<FileIndex<H>>>;
