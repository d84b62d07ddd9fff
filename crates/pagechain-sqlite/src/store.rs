//! SQLite witness store implementing the WitnessStore trait

use pagechain_core::{
    model::{MerkleNode, VerificationHash, WitnessEvent},
    storage::{StoreError, WitnessStore},
};
use rusqlite::{Connection, OptionalExtension};

type StoreResult<T> = Result<T, StoreError>;

use crate::json::{sql_to_timestamp, timestamp_to_sql};

/// SQLite-backed witness store
pub struct SqliteWitnessStore {
    conn: Connection,
}

impl SqliteWitnessStore {
    /// Create a new SQLite store from a connection
    ///
    /// The connection should already have migrations applied.
    /// Use [`crate::migrate::migrate`] to initialize a fresh database.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Create a new in-memory SQLite store (for testing)
    pub fn in_memory() -> crate::error::Result<Self> {
        let conn = Connection::open_in_memory()?;
        crate::migrate::migrate(&conn)?;
        Ok(Self::new(conn))
    }

    /// Create a new file-backed SQLite store
    pub fn open(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        crate::migrate::migrate(&conn)?;
        Ok(Self::new(conn))
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn row_to_node(row: &rusqlite::Row<'_>) -> rusqlite::Result<MerkleNode> {
        Ok(MerkleNode {
            witness_event_id: row.get(0)?,
            depth: row.get(1)?,
            left_leaf: row.get(2)?,
            right_leaf: row.get(3)?,
            successor: row.get(4)?,
        })
    }

    fn query_nodes(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> rusqlite::Result<Vec<MerkleNode>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, Self::row_to_node)?;
        rows.collect()
    }
}

impl WitnessStore for SqliteWitnessStore {
    fn get_event(&self, witness_event_id: u64) -> StoreResult<Option<WitnessEvent>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT witness_event_id, timestamp, merkle_root, witness_network, transaction_hash
                 FROM witness_events
                 WHERE witness_event_id = ?",
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let result: Option<(u64, String, String, String, String)> = stmt
            .query_row([witness_event_id], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })
            .optional()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match result {
            None => Ok(None),
            Some((id, timestamp_sql, merkle_root, witness_network, transaction_hash)) => {
                let timestamp = sql_to_timestamp(&timestamp_sql)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok(Some(WitnessEvent {
                    witness_event_id: id,
                    timestamp,
                    merkle_root,
                    witness_network,
                    transaction_hash,
                }))
            }
        }
    }

    fn get_nodes(
        &self,
        witness_event_id: u64,
        leaf_digest: &str,
        depth: Option<u32>,
    ) -> StoreResult<Vec<MerkleNode>> {
        let nodes = match depth {
            Some(depth) => self.query_nodes(
                "SELECT witness_event_id, depth, left_leaf, right_leaf, successor
                 FROM witness_merkle_tree
                 WHERE witness_event_id = ?1
                   AND (left_leaf = ?2 OR right_leaf = ?2)
                   AND depth = ?3
                 ORDER BY depth ASC",
                &[&witness_event_id, &leaf_digest, &depth],
            ),
            None => self.query_nodes(
                "SELECT witness_event_id, depth, left_leaf, right_leaf, successor
                 FROM witness_merkle_tree
                 WHERE witness_event_id = ?1
                   AND (left_leaf = ?2 OR right_leaf = ?2)
                 ORDER BY depth ASC",
                &[&witness_event_id, &leaf_digest],
            ),
        };

        nodes.map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn get_verification_hashes(&self, rev_id: u64) -> StoreResult<Vec<VerificationHash>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT rev_id, verification_hash
                 FROM revision_verification
                 WHERE rev_id = ?",
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let hashes = stmt
            .query_map([rev_id], |row| {
                Ok(VerificationHash {
                    rev_id: row.get(0)?,
                    digest: row.get(1)?,
                })
            })
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .collect::<rusqlite::Result<Vec<VerificationHash>>>()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(hashes)
    }

    fn put_event(&mut self, event: WitnessEvent) -> StoreResult<()> {
        if self.get_event(event.witness_event_id)?.is_some() {
            return Err(StoreError::AlreadyExists(format!(
                "witness event {}",
                event.witness_event_id
            )));
        }

        let timestamp_sql = timestamp_to_sql(event.timestamp)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO witness_events
                     (witness_event_id, timestamp, merkle_root, witness_network, transaction_hash)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    event.witness_event_id,
                    timestamp_sql,
                    event.merkle_root,
                    event.witness_network,
                    event.transaction_hash,
                ],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    fn put_node(&mut self, node: MerkleNode) -> StoreResult<()> {
        let duplicate = self
            .conn
            .prepare(
                "SELECT 1 FROM witness_merkle_tree
                 WHERE witness_event_id = ? AND depth = ? AND left_leaf = ? AND right_leaf = ?",
            )
            .and_then(|mut stmt| {
                stmt.exists(rusqlite::params![
                    node.witness_event_id,
                    node.depth,
                    node.left_leaf,
                    node.right_leaf,
                ])
            })
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if duplicate {
            return Err(StoreError::AlreadyExists(format!(
                "merkle node at event {} depth {}",
                node.witness_event_id, node.depth
            )));
        }

        self.conn
            .execute(
                "INSERT INTO witness_merkle_tree
                     (witness_event_id, depth, left_leaf, right_leaf, successor)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    node.witness_event_id,
                    node.depth,
                    node.left_leaf,
                    node.right_leaf,
                    node.successor,
                ],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    fn put_verification_hash(&mut self, hash: VerificationHash) -> StoreResult<()> {
        if !self.get_verification_hashes(hash.rev_id)?.is_empty() {
            return Err(StoreError::AlreadyExists(format!(
                "verification hash for revision {}",
                hash.rev_id
            )));
        }

        self.conn
            .execute(
                "INSERT INTO revision_verification (rev_id, verification_hash) VALUES (?, ?)",
                rusqlite::params![hash.rev_id, hash.digest],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }
}
