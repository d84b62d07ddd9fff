//! PageChain Core
//!
//! Tamper-evidence kernel for versioned wiki content. Revision and file
//! digests are anchored into witnessed Merkle trees; a queryable proof path
//! lets a third party recompute a witnessed root from a single leaf digest.
//!
//! The crate is platform-neutral and fully synchronous: every operation
//! executes within a single request, and witness records are append-only so
//! concurrent reads need no locking. Durable storage lives behind the
//! [`storage`] trait seams (see the `pagechain-sqlite` crate for the
//! rusqlite backend).
//!
//! # Example
//!
//! ```rust
//! use pagechain_core::{Hasher, MerkleNode, MerkleProofService, WitnessStore};
//! use pagechain_core::storage::MemoryStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let hasher = Hasher::new();
//! let left = hasher.digest(b"revision text");
//! let right = hasher.digest(b"other revision");
//!
//! let mut store = MemoryStore::new();
//! store.put_node(MerkleNode {
//!     witness_event_id: 1,
//!     depth: 0,
//!     successor: hasher.combine(&left, &right),
//!     left_leaf: left.clone(),
//!     right_leaf: right,
//! })?;
//!
//! let service = MerkleProofService::new(store);
//! let nodes = service.request_proof(Some(1), Some(&left), None)?;
//! assert_eq!(nodes[0].depth, 0);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod hasher;
pub mod logging;
pub mod model;
pub mod proof;
pub mod storage;

// Re-export main types at crate root
pub use api::{ApiError, ReadApi};
pub use config::{ConfigError, ConfigStore};
pub use hasher::Hasher;
pub use model::{ContentError, FileVerificationRecord, MerkleNode, VerificationHash, WitnessEvent};
pub use proof::{MerkleProofService, ProofError};
pub use storage::{SettingsStore, StoreError, StoreResult, WitnessStore};
