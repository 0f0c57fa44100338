//! Content hashing for the file index
//!
//! Files are digested by streaming their bytes through a fixed-width hash
//! algorithm, so arbitrarily large files are hashed with a constant memory
//! footprint. The algorithm is pluggable through the [`ContentHasher`] trait;
//! the index and server are generic over it, so the same logic works
//! unmodified across digest choices.
//!
//! Digests have a canonical lowercase hexadecimal text form (2 characters per
//! byte) shared by the wire protocol, logging, and tests.

use sha2::{Digest, Sha256, Sha512};
use std::fs::File;
use std::hash::Hash;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Buffer size for streaming hash computation (64KB)
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// A pluggable fixed-width content digest algorithm.
///
/// Hashing is synchronous and runs on the caller's thread; on the service's
/// single-threaded loop a large file stalls other work for the duration of
/// its digest, which is accepted in exchange for never hashing files whose
/// size is unique in the index.
pub trait ContentHasher {
    /// Fixed-width digest value, usable as a map key.
    type Digest: Copy + Eq + Hash + AsRef<[u8]>;

    /// Digest width in bytes; the wire protocol requires hex input of
    /// exactly twice this length.
    const DIGEST_LEN: usize;

    /// Stream the file at `path` through the algorithm and return the
    /// final digest. Fails if the file cannot be opened or read.
    fn digest_file(path: &Path) -> io::Result<Self::Digest>;

    /// Parse a hex-encoded digest. Returns `None` unless the input is
    /// exactly `2 * DIGEST_LEN` hex characters.
    fn digest_from_hex(hex: &str) -> Option<Self::Digest>;
}

/// SHA-256 content hashing (32-byte digests). The service default.
#[derive(Debug, Clone, Copy)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    type Digest = [u8; 32];
    const DIGEST_LEN: usize = 32;

    fn digest_file(path: &Path) -> io::Result<Self::Digest> {
        stream_file::<Sha256, 32>(path)
    }

    fn digest_from_hex(hex: &str) -> Option<Self::Digest> {
        decode_hex::<32>(hex)
    }
}

/// SHA-512 content hashing (64-byte digests).
#[derive(Debug, Clone, Copy)]
pub struct Sha512Hasher;

impl ContentHasher for Sha512Hasher {
    type Digest = [u8; 64];
    const DIGEST_LEN: usize = 64;

    fn digest_file(path: &Path) -> io::Result<Self::Digest> {
        stream_file::<Sha512, 64>(path)
    }

    fn digest_from_hex(hex: &str) -> Option<Self::Digest> {
        decode_hex::<64>(hex)
    }
}

/// Convert a digest to its canonical lowercase hexadecimal string
pub fn digest_to_hex(digest: impl AsRef<[u8]>) -> String {
    digest.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
}

/// Stream a file through a digest algorithm using a fixed-size buffer
/// (memory-efficient). Partial reads are accumulated until end-of-file.
fn stream_file<D: Digest, const N: usize>(path: &Path) -> io::Result<[u8; N]> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(HASH_BUFFER_SIZE, file);
    let mut hasher = D::new();
    let mut buffer = [0u8; HASH_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    let mut digest = [0u8; N];
    digest.copy_from_slice(&result);
    Ok(digest)
}

/// Parse a hexadecimal string into a fixed-width digest.
///
/// The input length must be exactly `2 * N`; both cases are accepted on
/// input while `digest_to_hex` always emits lowercase.
fn decode_hex<const N: usize>(hex: &str) -> Option<[u8; N]> {
    if hex.len() != N * 2 {
        return None;
    }

    let mut digest = [0u8; N];
    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        let hex_str = std::str::from_utf8(chunk).ok()?;
        digest[i] = u8::from_str_radix(hex_str, 16).ok()?;
    }

    Some(digest)
}
