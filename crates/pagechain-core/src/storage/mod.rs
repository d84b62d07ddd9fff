//! Storage abstraction for witness trees and settings
//!
//! This module defines the trait seams that abstract over storage backends.
//! Implementations exist for:
//!
//! - **Memory**: In-memory storage for testing (`MemoryStore`, `MemorySettings`)
//! - **SQLite**: Native SQLite via rusqlite (`pagechain-sqlite` crate)
//!
//! Witness records are append-only: events, nodes, and verification hashes
//! are never mutated after creation, so concurrent reads need no locking.

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{MemorySettings, MemoryStore};
pub use traits::{SettingsStore, WitnessStore};
