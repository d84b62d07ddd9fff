//! Verification data model: revision hashes, file verification slots,
//! witness events, and Merkle nodes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hasher::Hasher;

/// Verification digest of a single content revision.
///
/// Created once when the revision is saved and never edited in place; a new
/// revision gets a new entry. Owned by the revision it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationHash {
    /// Revision identifier in the host content store
    pub rev_id: u64,

    /// Lowercase hex digest of the revision content
    pub digest: String,
}

/// A batch anchoring operation that fixed a Merkle root over a set of leaf
/// digests at a point in time.
///
/// Immutable once created; later proofs must reconcile against
/// `merkle_root` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessEvent {
    pub witness_event_id: u64,

    /// When the event was witnessed (Unix timestamp milliseconds)
    pub timestamp: i64,

    /// The externally witnessed Merkle root
    pub merkle_root: String,

    /// Network the root was published to (e.g. "sepolia")
    pub witness_network: String,

    /// Transaction that carried the root on the witness network
    pub transaction_hash: String,
}

/// One node of a witness event's Merkle tree.
///
/// Depth 0 nodes carry raw revision/file digests as leaves; depth `k > 0`
/// nodes carry successors from depth `k - 1`. The node at the maximum depth
/// for an event has `successor == WitnessEvent::merkle_root`.
///
/// A digest may legitimately appear in more than one node, across depths or
/// even at the same depth, so nodes are addressed by
/// `(witness_event_id, leaf_digest, depth)` — never by digest alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleNode {
    pub witness_event_id: u64,
    pub depth: u32,
    pub left_leaf: String,
    pub right_leaf: String,
    pub successor: String,
}

impl MerkleNode {
    /// True when the stored successor matches the combining rule.
    pub fn is_consistent(&self, hasher: &Hasher) -> bool {
        self.successor == hasher.combine(&self.left_leaf, &self.right_leaf)
    }

    /// True when `digest` appears as either leaf of this node.
    pub fn has_leaf(&self, digest: &str) -> bool {
        self.left_leaf == digest || self.right_leaf == digest
    }
}

/// Errors from file-backed hashing sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The hashing source is missing or empty. Hashing an empty input would
    /// produce a meaningless "empty content" digest, so callers must fail
    /// instead of proceeding.
    #[error("content source is missing or empty")]
    UnreadableContent,
}

/// Verification digest of a file revision, stored as the text of a dedicated
/// content slot.
///
/// The empty string is a valid sentinel meaning "no hash computed";
/// rendering distinguishes it from a real digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVerificationRecord {
    text: String,
}

impl FileVerificationRecord {
    /// Wrap existing slot text. Surrounding whitespace is preserved in the
    /// stored text and stripped on read.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The "no hash computed" sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw slot text, exactly as stored.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The digest, trimmed, or `None` for the sentinel.
    pub fn digest(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Human-readable rendering of the slot.
    pub fn render(&self) -> String {
        match self.digest() {
            Some(digest) => format!("File verification hash: {}", digest),
            None => "No verification hash has been computed for this file.".to_string(),
        }
    }

    /// Hash file content into this record.
    ///
    /// Rejects missing/empty content with [`ContentError::UnreadableContent`]
    /// rather than storing the digest of nothing.
    pub fn set_hash_from_bytes(
        &mut self,
        hasher: &Hasher,
        content: &[u8],
    ) -> Result<(), ContentError> {
        if content.is_empty() {
            return Err(ContentError::UnreadableContent);
        }
        self.text = hasher.digest(content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_consistency() {
        let hasher = Hasher::new();
        let left = hasher.digest(b"rev-1");
        let right = hasher.digest(b"rev-2");
        let node = MerkleNode {
            witness_event_id: 1,
            depth: 0,
            successor: hasher.combine(&left, &right),
            left_leaf: left.clone(),
            right_leaf: right.clone(),
        };
        assert!(node.is_consistent(&hasher));
        assert!(node.has_leaf(&left));
        assert!(node.has_leaf(&right));
        assert!(!node.has_leaf("deadbeef"));
    }

    #[test]
    fn inconsistent_node_detected() {
        let hasher = Hasher::new();
        let node = MerkleNode {
            witness_event_id: 1,
            depth: 0,
            left_leaf: hasher.digest(b"a"),
            right_leaf: hasher.digest(b"b"),
            successor: hasher.digest(b"not-the-combination"),
        };
        assert!(!node.is_consistent(&hasher));
    }

    #[test]
    fn file_record_sentinel() {
        let record = FileVerificationRecord::empty();
        assert_eq!(record.digest(), None);
        assert!(record.render().contains("No verification hash"));
    }

    #[test]
    fn file_record_trims_on_read() {
        let record = FileVerificationRecord::new("  abc123  \n");
        assert_eq!(record.digest(), Some("abc123"));
        assert_eq!(record.render(), "File verification hash: abc123");
    }

    #[test]
    fn whitespace_only_is_sentinel() {
        let record = FileVerificationRecord::new("   \n\t");
        assert_eq!(record.digest(), None);
    }

    #[test]
    fn hash_from_bytes_round_trip() {
        let hasher = Hasher::new();
        let mut record = FileVerificationRecord::empty();
        record.set_hash_from_bytes(&hasher, b"hello").unwrap();

        // Reading back yields the digest with no surrounding whitespace
        let digest = record.digest().unwrap().to_string();
        assert_eq!(digest, hasher.digest(b"hello"));
        assert_eq!(digest.trim(), digest);
    }

    #[test]
    fn empty_content_is_rejected() {
        let hasher = Hasher::new();
        let mut record = FileVerificationRecord::empty();
        assert_eq!(
            record.set_hash_from_bytes(&hasher, b""),
            Err(ContentError::UnreadableContent)
        );
        assert_eq!(record.digest(), None);
    }
}
