//! Storage trait definitions

use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::{MerkleNode, VerificationHash, WitnessEvent};
use crate::storage::error::StoreResult;

/// Durable storage of witness events, their Merkle nodes, and per-revision
/// verification hashes.
///
/// Reads carry no business logic beyond the storage contract; writes are
/// issued by the witnessing pipeline and are append-only — records are never
/// mutated after creation.
pub trait WitnessStore {
    /// Retrieve a witness event by ID.
    ///
    /// Returns `None` if not found.
    fn get_event(&self, witness_event_id: u64) -> StoreResult<Option<WitnessEvent>>;

    /// Retrieve the Merkle nodes of an event in which `leaf_digest` appears
    /// as either leaf, ordered by ascending depth.
    ///
    /// With `depth` omitted, returns all matches across all depths (a digest
    /// can recur at several tree positions). With `depth` given, returns at
    /// most the unique `(witness_event_id, leaf_digest, depth)` match.
    fn get_nodes(
        &self,
        witness_event_id: u64,
        leaf_digest: &str,
        depth: Option<u32>,
    ) -> StoreResult<Vec<MerkleNode>>;

    /// Retrieve the verification hashes recorded for a revision.
    fn get_verification_hashes(&self, rev_id: u64) -> StoreResult<Vec<VerificationHash>>;

    /// Record a witness event.
    ///
    /// Returns `StoreError::AlreadyExists` if the event ID is taken.
    fn put_event(&mut self, event: WitnessEvent) -> StoreResult<()>;

    /// Record a Merkle node.
    ///
    /// Returns `StoreError::AlreadyExists` for an identical
    /// `(witness_event_id, depth, left_leaf, right_leaf)` row.
    fn put_node(&mut self, node: MerkleNode) -> StoreResult<()>;

    /// Record a revision's verification hash.
    ///
    /// One per revision: returns `StoreError::AlreadyExists` if the revision
    /// already has one.
    fn put_verification_hash(&mut self, hash: VerificationHash) -> StoreResult<()>;
}

/// Persisted settings layer backing the config store.
///
/// The check-then-act upsert (`exists` followed by `insert`/`update`) is
/// composed by the caller; its race window is a documented, surfaced failure
/// rather than something retried here.
pub trait SettingsStore {
    /// Load every persisted setting.
    ///
    /// When the backing table does not exist yet (mid-upgrade), returns an
    /// empty map rather than an error, so merged config reads still succeed.
    fn load_all(&self) -> StoreResult<BTreeMap<String, Value>>;

    /// Check whether a setting is persisted.
    fn exists(&self, name: &str) -> StoreResult<bool>;

    /// Insert a new setting.
    fn insert(&mut self, name: &str, value: &Value) -> StoreResult<()>;

    /// Update an existing setting.
    fn update(&mut self, name: &str, value: &Value) -> StoreResult<()>;
}
