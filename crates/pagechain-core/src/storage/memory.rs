//! In-memory storage backends
//!
//! Simple map-based implementations for testing and development.
//! Not suitable for production use due to lack of persistence.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::{MerkleNode, VerificationHash, WitnessEvent};
use crate::storage::error::{StoreError, StoreResult};
use crate::storage::traits::{SettingsStore, WitnessStore};

/// In-memory witness store.
///
/// Useful for:
/// - Unit testing
/// - Development/prototyping
/// - Short-lived processes that don't need persistence
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: BTreeMap<u64, WitnessEvent>,
    nodes: Vec<MerkleNode>,
    verification_hashes: BTreeMap<u64, VerificationHash>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total persisted Merkle nodes (for testing).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl WitnessStore for MemoryStore {
    fn get_event(&self, witness_event_id: u64) -> StoreResult<Option<WitnessEvent>> {
        Ok(self.events.get(&witness_event_id).cloned())
    }

    fn get_nodes(
        &self,
        witness_event_id: u64,
        leaf_digest: &str,
        depth: Option<u32>,
    ) -> StoreResult<Vec<MerkleNode>> {
        let mut matches: Vec<MerkleNode> = self
            .nodes
            .iter()
            .filter(|n| n.witness_event_id == witness_event_id)
            .filter(|n| n.has_leaf(leaf_digest))
            .filter(|n| depth.map_or(true, |d| n.depth == d))
            .cloned()
            .collect();
        matches.sort_by_key(|n| n.depth);
        Ok(matches)
    }

    fn get_verification_hashes(&self, rev_id: u64) -> StoreResult<Vec<VerificationHash>> {
        Ok(self
            .verification_hashes
            .get(&rev_id)
            .cloned()
            .into_iter()
            .collect())
    }

    fn put_event(&mut self, event: WitnessEvent) -> StoreResult<()> {
        if self.events.contains_key(&event.witness_event_id) {
            return Err(StoreError::AlreadyExists(format!(
                "witness event {}",
                event.witness_event_id
            )));
        }
        self.events.insert(event.witness_event_id, event);
        Ok(())
    }

    fn put_node(&mut self, node: MerkleNode) -> StoreResult<()> {
        let duplicate = self.nodes.iter().any(|n| {
            n.witness_event_id == node.witness_event_id
                && n.depth == node.depth
                && n.left_leaf == node.left_leaf
                && n.right_leaf == node.right_leaf
        });
        if duplicate {
            return Err(StoreError::AlreadyExists(format!(
                "merkle node at event {} depth {}",
                node.witness_event_id, node.depth
            )));
        }
        self.nodes.push(node);
        Ok(())
    }

    fn put_verification_hash(&mut self, hash: VerificationHash) -> StoreResult<()> {
        if self.verification_hashes.contains_key(&hash.rev_id) {
            return Err(StoreError::AlreadyExists(format!(
                "verification hash for revision {}",
                hash.rev_id
            )));
        }
        self.verification_hashes.insert(hash.rev_id, hash);
        Ok(())
    }
}

/// In-memory settings layer.
///
/// `detached()` simulates the mid-upgrade state where the backing table does
/// not exist yet: reads degrade to an empty layer and writes fail.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, Value>,
    detached: bool,
}

impl MemorySettings {
    /// Create a new empty settings store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose backing table "does not exist yet".
    pub fn detached() -> Self {
        Self {
            values: BTreeMap::new(),
            detached: true,
        }
    }

    fn backing_missing(&self) -> StoreError {
        StoreError::Backend("no such table: settings".to_string())
    }
}

impl SettingsStore for MemorySettings {
    fn load_all(&self) -> StoreResult<BTreeMap<String, Value>> {
        if self.detached {
            return Ok(BTreeMap::new());
        }
        Ok(self.values.clone())
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        if self.detached {
            return Err(self.backing_missing());
        }
        Ok(self.values.contains_key(name))
    }

    fn insert(&mut self, name: &str, value: &Value) -> StoreResult<()> {
        if self.detached {
            return Err(self.backing_missing());
        }
        if self.values.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        self.values.insert(name.to_string(), value.clone());
        Ok(())
    }

    fn update(&mut self, name: &str, value: &Value) -> StoreResult<()> {
        if self.detached {
            return Err(self.backing_missing());
        }
        if !self.values.contains_key(name) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.values.insert(name.to_string(), value.clone());
        Ok(())
    }
}
