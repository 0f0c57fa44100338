//! The content-addressable file index
//!
//! Files are indexed with a two-tier strategy for efficiency:
//! 1. **By size**: every file is keyed by its size (O(1) lookup)
//! 2. **By hash**: only files whose sizes collide are hash-compared
//!
//! This avoids computing expensive content hashes for files that can't
//! possibly be duplicates (different sizes). A size seen once is stored as a
//! bare path; the moment a second distinct path of the same size arrives,
//! both files are hashed and the slot converts to a digest→path map.

use log::trace;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{IndexerError, Result};
use crate::index::hasher::ContentHasher;

/// Per-file-size record in the index.
pub enum Slot<H: ContentHasher> {
    /// Exactly one file of this size has been pushed; its content hash has
    /// never been computed.
    Unique(PathBuf),
    /// Two or more files share this size; each is keyed by content digest.
    Disambiguated(HashMap<H::Digest, PathBuf>),
}

/// In-memory index mapping file size to a [`Slot`].
///
/// The index only grows: there is no deletion, update, or expiry. All access
/// must happen on the loop thread that owns it (see [`crate::index::SharedIndex`]);
/// with that discipline no internal locking is required.
pub struct FileIndex<H: ContentHasher> {
    slots: HashMap<u64, Slot<H>>,
    /// Number of paths stored across all slots.
    paths: usize,
}

impl<H: ContentHasher> FileIndex<H> {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            paths: 0,
        }
    }

    /// Register a discovered file.
    ///
    /// Obtains the file's size, then either stores the path under a fresh
    /// size slot, converts a colliding `Unique` slot to `Disambiguated`
    /// (hashing both the existing and the new file), or inserts into an
    /// existing `Disambiguated` slot. Within a slot a digest maps to the
    /// first path ever observed for it; later pushes colliding on the same
    /// digest do not replace it.
    ///
    /// Re-pushing a path already stored as `Unique` is a no-op, so the
    /// operation is idempotent. An I/O failure (file vanished, unreadable)
    /// is an error for this entry only and leaves the index unchanged;
    /// callers skip the entry and continue.
    pub fn push(&mut self, path: &Path) -> Result<()> {
        let size = fs::metadata(path)
            .map_err(|e| IndexerError::Metadata {
                path: path.to_path_buf(),
                source: e,
            })?
            .len();

        match self.slots.entry(size) {
            Entry::Vacant(vacant) => {
                trace!("indexing {} by size", path.display());
                vacant.insert(Slot::Unique(path.to_path_buf()));
                self.paths += 1;
            }
            Entry::Occupied(mut occupied) => {
                match occupied.get_mut() {
                    Slot::Unique(existing) => {
                        if existing.as_path() == path {
                            return Ok(());
                        }
                        trace!("indexing {} by hash, rehashing", path.display());
                        let existing = existing.clone();
                        let mut map = HashMap::with_capacity(2);
                        map.insert(hash_file::<H>(&existing)?, existing);
                        if let Entry::Vacant(vacant) = map.entry(hash_file::<H>(path)?) {
                            vacant.insert(path.to_path_buf());
                            self.paths += 1;
                        }
                        occupied.insert(Slot::Disambiguated(map));
                    }
                    Slot::Disambiguated(map) => {
                        trace!("indexing {} by hash", path.display());
                        if let Entry::Vacant(vacant) = map.entry(hash_file::<H>(path)?) {
                            vacant.insert(path.to_path_buf());
                            self.paths += 1;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Answer a query for a file of the given size and digest.
    ///
    /// A `Unique` slot returns its path unconditionally, regardless of the
    /// supplied digest: no hash was ever computed for a singleton size, so
    /// none is available to check against. The possible false positive is an
    /// accepted tradeoff of the lazy-hashing design, not a bug.
    pub fn pull(&self, size: u64, digest: &H::Digest) -> Option<&Path> {
        match self.slots.get(&size)? {
            Slot::Unique(path) => Some(path),
            Slot::Disambiguated(map) => map.get(digest).map(PathBuf::as_path),
        }
    }

    /// Number of paths stored in the index
    pub fn len(&self) -> usize {
        self.paths
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.paths == 0
    }
}

impl<H: ContentHasher> Default for FileIndex<H> {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_file<H: ContentHasher>(path: &Path) -> Result<H::Digest> {
    H::digest_file(path).map_err(|e| IndexerError::Hash {
        path: path.to_path_buf(),
        source: e,
    })
}
