//! Merkle proof retrieval
//!
//! Answers "prove that this leaf digest is included under this witness
//! event's witnessed root" one tree level at a time. The service is
//! storage-shaped and stateless: full-chain verification is a composition
//! the caller performs by walking depths upward, feeding
//! `Hasher::combine(left_leaf, right_leaf)` forward as the next depth's
//! search key, and finally comparing the last computed value against
//! `WitnessEvent::merkle_root`.

use thiserror::Error;

use crate::model::MerkleNode;
use crate::storage::{StoreError, WitnessStore};

/// Errors from proof retrieval.
///
/// Returned as values, never panics — callers decide user-facing
/// presentation.
#[derive(Debug, Clone, Error)]
pub enum ProofError {
    /// `witness_event_id` was not supplied
    #[error("witness_event_id is not specified but expected")]
    MissingWitnessEventId,

    /// `leaf_digest` was not supplied
    #[error("leaf_digest is not specified but expected")]
    MissingLeafDigest,

    /// No proof node matches the given coordinates. Distinct from an empty
    /// success: the leaf did not participate in the event (at that depth).
    #[error("no proof node for leaf {leaf_digest} in witness event {witness_event_id}{}",
        .depth.map(|d| format!(" at depth {}", d)).unwrap_or_default())]
    NoSuchNode {
        witness_event_id: u64,
        leaf_digest: String,
        depth: Option<u32>,
    },

    /// Storage-layer failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Retrieves the proof steps connecting a leaf digest to a witnessed root.
///
/// Holds its `WitnessStore` as an explicit constructor-supplied dependency.
pub struct MerkleProofService<S: WitnessStore> {
    store: S,
}

impl<S: WitnessStore> MerkleProofService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store (read-side lookups, tests).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access for the witnessing pipeline's append-only writes.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Fetch the proof node(s) in which `leaf_digest` appears for a witness
    /// event.
    ///
    /// With `depth` omitted and the digest recurring at several tree
    /// positions (a replay), all matches are returned ordered and tagged by
    /// depth; it is the caller's responsibility to pick the depth for its
    /// intended audit path. This is a deliberate multi-result contract, not
    /// an error. With `depth` given, at most the unique match is returned.
    ///
    /// Zero matches yield [`ProofError::NoSuchNode`], never an empty success.
    pub fn request_proof(
        &self,
        witness_event_id: Option<u64>,
        leaf_digest: Option<&str>,
        depth: Option<u32>,
    ) -> Result<Vec<MerkleNode>, ProofError> {
        let witness_event_id = witness_event_id.ok_or(ProofError::MissingWitnessEventId)?;
        let leaf_digest = leaf_digest
            .filter(|d| !d.is_empty())
            .ok_or(ProofError::MissingLeafDigest)?;

        let nodes = self.store.get_nodes(witness_event_id, leaf_digest, depth)?;
        if nodes.is_empty() {
            return Err(ProofError::NoSuchNode {
                witness_event_id,
                leaf_digest: leaf_digest.to_string(),
                depth,
            });
        }
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Hasher;
    use crate::model::{MerkleNode, WitnessEvent};
    use crate::storage::MemoryStore;

    fn node(event_id: u64, depth: u32, left: &str, right: &str) -> MerkleNode {
        MerkleNode {
            witness_event_id: event_id,
            depth,
            left_leaf: left.into(),
            right_leaf: right.into(),
            successor: Hasher::new().combine(left, right),
        }
    }

    /// Build a two-level tree over four leaves and record its event.
    /// Returns (service, leaves, root).
    fn witnessed_tree() -> (MerkleProofService<MemoryStore>, Vec<String>, String) {
        let hasher = Hasher::new();
        let leaves: Vec<String> = (0..4)
            .map(|i| hasher.digest(format!("rev-{}", i).as_bytes()))
            .collect();

        let mut store = MemoryStore::new();
        let n01 = node(5, 0, &leaves[0], &leaves[1]);
        let n23 = node(5, 0, &leaves[2], &leaves[3]);
        let root_node = node(5, 1, &n01.successor, &n23.successor);
        let root = root_node.successor.clone();

        store
            .put_event(WitnessEvent {
                witness_event_id: 5,
                timestamp: 1_718_452_800_000,
                merkle_root: root.clone(),
                witness_network: "sepolia".into(),
                transaction_hash: "0xfeed".into(),
            })
            .unwrap();
        store.put_node(n01).unwrap();
        store.put_node(n23).unwrap();
        store.put_node(root_node).unwrap();

        (MerkleProofService::new(store), leaves, root)
    }

    #[test]
    fn missing_parameters_are_distinct() {
        let service = MerkleProofService::new(MemoryStore::new());
        assert!(matches!(
            service.request_proof(None, Some("abc"), None),
            Err(ProofError::MissingWitnessEventId)
        ));
        assert!(matches!(
            service.request_proof(Some(1), None, None),
            Err(ProofError::MissingLeafDigest)
        ));
        // An empty digest is as absent as no digest
        assert!(matches!(
            service.request_proof(Some(1), Some(""), None),
            Err(ProofError::MissingLeafDigest)
        ));
    }

    #[test]
    fn zero_matches_is_not_found() {
        let (service, _, _) = witnessed_tree();
        let err = service
            .request_proof(Some(5), Some("unwitnessed"), None)
            .unwrap_err();
        assert!(matches!(err, ProofError::NoSuchNode { .. }));
    }

    #[test]
    fn explicit_depth_selects_a_single_node() {
        let (service, leaves, _) = witnessed_tree();
        let nodes = service
            .request_proof(Some(5), Some(&leaves[0]), Some(0))
            .unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].depth, 0);

        assert!(matches!(
            service.request_proof(Some(5), Some(&leaves[0]), Some(7)),
            Err(ProofError::NoSuchNode { depth: Some(7), .. })
        ));
    }

    #[test]
    fn replayed_leaf_returns_all_depths() {
        let hasher = Hasher::new();
        let leaf = hasher.digest(b"replayed");
        let other = hasher.digest(b"other");

        let mut store = MemoryStore::new();
        store.put_node(node(9, 1, &leaf, &other)).unwrap();
        store.put_node(node(9, 3, &other, &leaf)).unwrap();

        let service = MerkleProofService::new(store);
        let nodes = service.request_proof(Some(9), Some(&leaf), None).unwrap();
        let depths: Vec<u32> = nodes.iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![1, 3]);
    }

    #[test]
    fn walking_depths_reproduces_the_recorded_root() {
        let (service, leaves, _) = witnessed_tree();
        let hasher = Hasher::new();

        let event = service.store().get_event(5).unwrap().unwrap();

        // Full-chain verification as a caller composes it: start from the
        // leaf at depth 0 and feed each successor forward.
        for leaf in &leaves {
            let mut current = leaf.clone();
            let mut depth = 0u32;
            loop {
                match service.request_proof(Some(5), Some(&current), Some(depth)) {
                    Ok(nodes) => {
                        let n = &nodes[0];
                        assert!(n.is_consistent(&hasher));
                        current = hasher.combine(&n.left_leaf, &n.right_leaf);
                        depth += 1;
                    }
                    Err(ProofError::NoSuchNode { .. }) => break,
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }
            assert_eq!(current, event.merkle_root);
        }
    }
}
