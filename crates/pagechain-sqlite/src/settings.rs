//! SQLite settings layer implementing the SettingsStore trait
//!
//! Values are stored JSON-encoded in a `settings` table keyed by name. The
//! table arrives in a later migration than the witness tables, so `load_all`
//! treats its absence as an empty layer rather than an error — merged config
//! reads must keep working mid-upgrade. Writes against the absent table do
//! fail, and that failure is surfaced to the caller.

use std::collections::BTreeMap;

use pagechain_core::{storage::SettingsStore, StoreError};
use rusqlite::Connection;
use serde_json::Value;

use crate::json::{decode_setting, encode_setting};
use crate::migrate::table_exists;

type StoreResult<T> = Result<T, StoreError>;

/// SQLite-backed settings store
pub struct SqliteSettingsStore {
    conn: Connection,
}

impl SqliteSettingsStore {
    /// Create a settings store from a connection
    ///
    /// The connection need not have the settings migration applied; reads
    /// degrade until it is.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Create a new in-memory settings store with migrations applied
    /// (for testing)
    pub fn in_memory() -> crate::error::Result<Self> {
        let conn = Connection::open_in_memory()?;
        crate::migrate::migrate(&conn)?;
        Ok(Self::new(conn))
    }

    /// Open a file-backed settings store with migrations applied
    pub fn open(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let conn = Connection::open(path)?;
        crate::migrate::migrate(&conn)?;
        Ok(Self::new(conn))
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn load_all(&self) -> StoreResult<BTreeMap<String, Value>> {
        // Upgrade window: the table may not exist yet
        let present = table_exists(&self.conn, "settings")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        if !present {
            return Ok(BTreeMap::new());
        }

        let mut stmt = self
            .conn
            .prepare("SELECT name, value FROM settings")
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .collect::<rusqlite::Result<Vec<(String, String)>>>()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut values = BTreeMap::new();
        for (name, json) in rows {
            let value =
                decode_setting(&json).map_err(|e| StoreError::Serialization(e.to_string()))?;
            values.insert(name, value);
        }
        Ok(values)
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        self.conn
            .prepare("SELECT 1 FROM settings WHERE name = ?")
            .and_then(|mut stmt| stmt.exists([name]))
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn insert(&mut self, name: &str, value: &Value) -> StoreResult<()> {
        let json = encode_setting(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO settings (name, value) VALUES (?, ?)",
                [name, json.as_str()],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn update(&mut self, name: &str, value: &Value) -> StoreResult<()> {
        let json = encode_setting(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let changed = self
            .conn
            .execute(
                "UPDATE settings SET value = ? WHERE name = ?",
                [json.as_str(), name],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        if changed == 0 {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(())
    }
}
