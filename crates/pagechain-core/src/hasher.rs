//! Deterministic content hashing for revision and file verification.
//!
//! Produces a SHA-512 digest as lowercase hex (128 chars). The same function
//! doubles as the Merkle combining rule: a node's successor is the digest of
//! its left and right leaf hex strings concatenated, in that order.

use sha2::{Digest, Sha512};

/// Content hasher shared by revision verification, file verification, and
/// Merkle successor computation.
///
/// Stateless. Constructed once and passed explicitly to whatever needs it —
/// never looked up from ambient global state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher;

impl Hasher {
    pub fn new() -> Self {
        Self
    }

    /// Compute the SHA-512 digest of raw content as lowercase hex.
    ///
    /// Equal inputs yield equal outputs, across processes and over time.
    /// This is the correctness anchor for every later comparison.
    pub fn digest(&self, content: &[u8]) -> String {
        let mut h = Sha512::new();
        h.update(content);
        hex_encode(&h.finalize())
    }

    /// Combine two digests into their Merkle successor.
    ///
    /// Defined as `digest(left ++ right)` over the UTF-8 bytes of the two hex
    /// strings with no separator. Digests are fixed-length, so the
    /// concatenation is unambiguous. Order-sensitive: swapping the operands
    /// changes the result. No trimming or whitespace normalization is applied.
    pub fn combine(&self, left: &str, right: &str) -> String {
        let mut h = Sha512::new();
        h.update(left.as_bytes());
        h.update(right.as_bytes());
        hex_encode(&h.finalize())
    }
}

// Inline hex encoding to avoid adding another dependency
const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

fn hex_encode(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push(HEX_CHARS[(b >> 4) as usize] as char);
        s.push(HEX_CHARS[(b & 0x0f) as usize] as char);
    }
    s
}
