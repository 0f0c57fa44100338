//! Wire protocol for the query server
//!
//! Requests and responses are single UTF-8 text lines over TCP:
//!
//! ```text
//! request:  <decimal file size>;<hex-encoded digest>\n
//! response: <path> | "not found" | "bad request"\n
//! ```
//!
//! The hex digest's length must equal exactly twice the digest algorithm's
//! byte length; any deviation is a parse failure.

use crate::index::ContentHasher;

/// Separator between the size and digest fields of a request
pub const REQUEST_SEP: char = ';';

/// Line terminator for both requests and responses
pub const LINE_END: char = '\n';

/// Response marker for a query that matched nothing
pub const NOT_FOUND: &str = "not found";

/// Response marker for a request that could not be parsed
pub const BAD_REQUEST: &str = "bad request";

/// Parse one request line into `(size, digest)`.
///
/// Strict by design: the line must carry the terminator, exactly one
/// separator, a decimal size, and a digest of exactly `2 * DIGEST_LEN` hex
/// characters with nothing trailing.
pub fn parse_request<H: ContentHasher>(line: &str) -> Option<(u64, H::Digest)> {
    let line = line.strip_suffix(LINE_END)?;
    let (size, hex) = line.split_once(REQUEST_SEP)?;
    let size = size.parse::<u64>().ok()?;
    let digest = H::digest_from_hex(hex)?;
    Some((size, digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{digest_to_hex, Sha256Hasher};

    fn hex_of(byte: u8) -> String {
        digest_to_hex([byte; 32])
    }

    #[test]
    fn test_parse_well_formed_request() {
        let line = format!("1024;{}\n", hex_of(0xab));
        let (size, digest) = parse_request::<Sha256Hasher>(&line).unwrap();
        assert_eq!(size, 1024);
        assert_eq!(digest, [0xab; 32]);
    }

    #[test]
    fn test_parse_rejects_missing_terminator() {
        let line = format!("1024;{}", hex_of(0xab));
        assert!(parse_request::<Sha256Hasher>(&line).is_none());
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let line = format!("1024{}\n", hex_of(0xab));
        assert!(parse_request::<Sha256Hasher>(&line).is_none());
    }

    #[test]
    fn test_parse_rejects_bad_size() {
        let line = format!("notanumber;{}\n", hex_of(0xab));
        assert!(parse_request::<Sha256Hasher>(&line).is_none());
        let line = format!("-3;{}\n", hex_of(0xab));
        assert!(parse_request::<Sha256Hasher>(&line).is_none());
    }

    #[test]
    fn test_parse_rejects_wrong_hex_length() {
        assert!(parse_request::<Sha256Hasher>("4;deadbeef\n").is_none());
        // One trailing character beyond the digest is also a failure.
        let line = format!("4;{}0\n", hex_of(0xab));
        assert!(parse_request::<Sha256Hasher>(&line).is_none());
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(parse_request::<Sha256Hasher>("\n").is_none());
        assert!(parse_request::<Sha256Hasher>("").is_none());
    }
}
