//! Read-gateway logical operations
//!
//! The transport-agnostic operations a REST gateway dispatches to. Parameters
//! arrive string-shaped (the transport's native currency); validation
//! failures are returned as values, never as panics, so the gateway decides
//! user-facing presentation.

use thiserror::Error;

use crate::model::{MerkleNode, VerificationHash};
use crate::proof::{MerkleProofService, ProofError};
use crate::storage::{StoreError, WitnessStore};

/// Errors at the read-gateway boundary.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// `witness_event_id` did not parse as an event identifier
    #[error("invalid witness_event_id: '{0}'")]
    InvalidWitnessEventId(String),

    /// `depth` did not parse as a non-negative integer
    #[error("invalid depth: '{0}'")]
    InvalidDepth(String),

    /// Proof-lookup failure (missing parameter, no matching node, storage)
    #[error(transparent)]
    Proof(#[from] ProofError),

    /// Storage-layer failure outside the proof path
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Thin request dispatcher over the proof service and hash lookup.
///
/// All collaborators are constructor-supplied; nothing is resolved from
/// ambient global state.
pub struct ReadApi<S: WitnessStore> {
    proofs: MerkleProofService<S>,
}

impl<S: WitnessStore> ReadApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            proofs: MerkleProofService::new(store),
        }
    }

    /// The proof service backing this gateway.
    pub fn proofs(&self) -> &MerkleProofService<S> {
        &self.proofs
    }

    /// Mutable access for the witnessing pipeline's append-only writes.
    pub fn proofs_mut(&mut self) -> &mut MerkleProofService<S> {
        &mut self.proofs
    }

    /// `request_merkle_proof` boundary operation.
    ///
    /// Missing `witness_event_id` and missing `leaf_digest` yield distinct
    /// errors; a supplied but non-numeric `witness_event_id` or `depth` is a
    /// typed validation error rather than a silent storage mismatch.
    pub fn request_merkle_proof(
        &self,
        witness_event_id: Option<&str>,
        leaf_digest: Option<&str>,
        depth: Option<&str>,
    ) -> Result<Vec<MerkleNode>, ApiError> {
        let witness_event_id = match witness_event_id {
            None => None,
            Some(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| ApiError::InvalidWitnessEventId(raw.to_string()))?,
            ),
        };
        let depth = match depth {
            None => None,
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| ApiError::InvalidDepth(raw.to_string()))?,
            ),
        };
        Ok(self.proofs.request_proof(witness_event_id, leaf_digest, depth)?)
    }

    /// Raw hash lookup backing `request_stored_hash`.
    pub fn stored_hashes(&self, rev_id: u64) -> Result<Vec<VerificationHash>, ApiError> {
        Ok(self.proofs.store().get_verification_hashes(rev_id)?)
    }

    /// `request_stored_hash` boundary operation.
    ///
    /// Produces the human-signable statement, one clause per matching
    /// record, concatenated. Empty when the revision has no recorded hash.
    pub fn request_stored_hash(&self, rev_id: u64) -> Result<String, ApiError> {
        let mut output = String::new();
        for hash in self.stored_hashes(rev_id)? {
            output.push_str(&format!(
                "I sign the following page verification_hash: [0x{}]",
                hash.digest
            ));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Hasher;
    use crate::model::MerkleNode;
    use crate::storage::MemoryStore;

    fn api_with_node(leaf: &str) -> ReadApi<MemoryStore> {
        let hasher = Hasher::new();
        let mut api = ReadApi::new(MemoryStore::new());
        api.proofs_mut()
            .store_mut()
            .put_node(MerkleNode {
                witness_event_id: 3,
                depth: 0,
                left_leaf: leaf.into(),
                right_leaf: leaf.into(),
                successor: hasher.combine(leaf, leaf),
            })
            .unwrap();
        api
    }

    #[test]
    fn missing_parameters_map_through() {
        let api = ReadApi::new(MemoryStore::new());
        assert!(matches!(
            api.request_merkle_proof(None, Some("abc"), None),
            Err(ApiError::Proof(ProofError::MissingWitnessEventId))
        ));
        assert!(matches!(
            api.request_merkle_proof(Some("3"), None, None),
            Err(ApiError::Proof(ProofError::MissingLeafDigest))
        ));
    }

    #[test]
    fn malformed_numbers_are_validation_errors() {
        let api = ReadApi::new(MemoryStore::new());
        assert!(matches!(
            api.request_merkle_proof(Some("not-a-number"), Some("abc"), None),
            Err(ApiError::InvalidWitnessEventId(_))
        ));
        assert!(matches!(
            api.request_merkle_proof(Some("3"), Some("abc"), Some("-1")),
            Err(ApiError::InvalidDepth(_))
        ));
    }

    #[test]
    fn proof_lookup_dispatches() {
        let leaf = Hasher::new().digest(b"rev");
        let api = api_with_node(&leaf);

        let nodes = api
            .request_merkle_proof(Some("3"), Some(&leaf), Some("0"))
            .unwrap();
        assert_eq!(nodes.len(), 1);

        assert!(matches!(
            api.request_merkle_proof(Some("3"), Some(&leaf), Some("2")),
            Err(ApiError::Proof(ProofError::NoSuchNode { .. }))
        ));
    }

    #[test]
    fn signable_statement_format() {
        let mut api = ReadApi::new(MemoryStore::new());
        api.proofs_mut()
            .store_mut()
            .put_verification_hash(VerificationHash {
                rev_id: 12,
                digest: "abc123".into(),
            })
            .unwrap();

        assert_eq!(
            api.request_stored_hash(12).unwrap(),
            "I sign the following page verification_hash: [0xabc123]"
        );
        assert_eq!(api.request_stored_hash(13).unwrap(), "");
    }
}
