//! SQLite storage backend for PageChain
//!
//! This crate provides a persistent SQLite implementation of the
//! pagechain-core storage traits, enabling native deployments to keep
//! witness events, Merkle nodes, revision verification hashes, and persisted
//! settings on disk.
//!
//! # Features
//!
//! - Implements the `WitnessStore` and `SettingsStore` traits
//! - Versioned, idempotent migration runner with embedded SQL
//! - Supports in-memory databases for testing
//! - The settings table may lawfully be absent mid-upgrade; reads degrade
//!   to an empty layer
//!
//! # Example
//!
//! ```rust,no_run
//! use pagechain_core::{Hasher, MerkleNode, WitnessEvent, WitnessStore};
//! use pagechain_sqlite::SqliteWitnessStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let hasher = Hasher::new();
//! let left = hasher.digest(b"revision text");
//! let right = hasher.digest(b"other revision");
//!
//! let mut store = SqliteWitnessStore::in_memory()?;
//! store.put_event(WitnessEvent {
//!     witness_event_id: 1,
//!     timestamp: 1_718_452_800_000,
//!     merkle_root: hasher.combine(&left, &right),
//!     witness_network: "sepolia".into(),
//!     transaction_hash: "0xfeed".into(),
//! })?;
//! store.put_node(MerkleNode {
//!     witness_event_id: 1,
//!     depth: 0,
//!     successor: hasher.combine(&left, &right),
//!     left_leaf: left.clone(),
//!     right_leaf: right,
//! })?;
//!
//! let nodes = store.get_nodes(1, &left, None)?;
//! assert_eq!(nodes.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod json;
pub mod migrate;
pub mod settings;
pub mod store;

// Re-export main types
pub use error::{Result, SqliteError};
pub use settings::SqliteSettingsStore;
pub use store::SqliteWitnessStore;
