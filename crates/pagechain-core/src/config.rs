//! Layered, mutable configuration for verification behavior
//!
//! Three layers merged at read time, highest precedence first:
//!
//! 1. **Persisted** — settings table behind a [`SettingsStore`]; the only
//!    mutable layer, loaded lazily and cached.
//! 2. **Process-wide** — overrides fixed for the process lifetime, supplied
//!    at construction. Doubles as the allow-list: only keys declared here
//!    may be written.
//! 3. **Defaults** — static fallback values.
//!
//! The merged snapshot is built on first access and rebuilt only after a
//! successful [`ConfigStore::set`]. External mutation of the persisted layer
//! (another process writing the same table) is therefore observed only after
//! a local `set` or a restart.
//!
//! Known race: `set` is a check-then-act upsert (`exists`, then `update` or
//! `insert`). Two concurrent first-time writers of one key can both observe
//! "absent" and collide on insert; the loser surfaces
//! [`ConfigError::Database`]. Callers may retry; this store does not. A
//! backend with an atomic conditional write could close the window.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::storage::SettingsStore;

/// Errors from configuration mutation.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The key is not declared in the process-wide layer (the allow-list)
    #[error("the config '{0}' does not exist within the process-wide layer")]
    UnknownKey(String),

    /// Storage-layer failure; the underlying message is preserved verbatim
    #[error("{0}")]
    Database(String),
}

/// Static default values for every known verification setting.
pub fn defaults() -> BTreeMap<String, Value> {
    BTreeMap::from([
        ("witness_network".to_string(), Value::from("sepolia")),
        (
            "smart_contract_address".to_string(),
            Value::from("0x45f59310add88e6d23ca58a0fa7a55bee6d2a611"),
        ),
        ("domain_id".to_string(), Value::from("unspecified")),
        ("signature_required".to_string(), Value::from(false)),
    ])
}

/// Merged read/write access to verification-behavior settings.
pub struct ConfigStore<S: SettingsStore> {
    settings: S,
    process: BTreeMap<String, Value>,
    defaults: BTreeMap<String, Value>,
    /// Lazily loaded persisted layer
    persisted: Option<BTreeMap<String, Value>>,
    /// Cached merged snapshot; `None` means stale
    snapshot: Option<BTreeMap<String, Value>>,
}

impl<S: SettingsStore> ConfigStore<S> {
    /// Construct with the default key set declared process-wide.
    pub fn new(settings: S) -> Self {
        Self::with_overrides(settings, BTreeMap::new())
    }

    /// Construct with process-wide overrides layered over the declared
    /// defaults. Keys outside the default set extend the allow-list.
    pub fn with_overrides(settings: S, overrides: BTreeMap<String, Value>) -> Self {
        let mut process = defaults();
        process.extend(overrides);
        Self {
            settings,
            process,
            defaults: defaults(),
            persisted: None,
            snapshot: None,
        }
    }

    /// The merged configuration snapshot.
    ///
    /// Built on first access per process lifetime and cached; rebuilt only
    /// after a successful [`set`](Self::set). Always succeeds: an absent
    /// persisted backing store degrades to an empty persisted layer.
    pub fn snapshot(&mut self) -> Result<&BTreeMap<String, Value>, ConfigError> {
        if self.snapshot.is_none() {
            let merged = self.build_snapshot()?;
            debug!(keys = merged.len(), "rebuilt merged config snapshot");
            self.snapshot = Some(merged);
        }
        // Unwrap is fine: just populated above
        Ok(self.snapshot.as_ref().unwrap())
    }

    /// Look up one setting in the merged snapshot.
    pub fn get(&mut self, name: &str) -> Result<Option<Value>, ConfigError> {
        Ok(self.snapshot()?.get(name).cloned())
    }

    /// True when the key is known to any layer.
    pub fn has(&mut self, name: &str) -> Result<bool, ConfigError> {
        Ok(self.snapshot()?.contains_key(name))
    }

    /// Write a setting to the persisted layer.
    ///
    /// Fails with [`ConfigError::UnknownKey`] for keys outside the
    /// process-wide allow-list, and with [`ConfigError::Database`] on any
    /// storage failure. On success the persisted layer is reloaded and the
    /// merged snapshot invalidated, so the new value is visible without a
    /// process restart.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ConfigError> {
        if !self.process.contains_key(name) {
            return Err(ConfigError::UnknownKey(name.to_string()));
        }

        // Check-then-act upsert; see the module docs for the race window.
        let exists = self
            .settings
            .exists(name)
            .map_err(|e| ConfigError::Database(e.to_string()))?;
        let written = if exists {
            self.settings.update(name, &value)
        } else {
            self.settings.insert(name, &value)
        };
        written.map_err(|e| ConfigError::Database(e.to_string()))?;

        self.persisted = Some(
            self.settings
                .load_all()
                .map_err(|e| ConfigError::Database(e.to_string()))?,
        );
        self.snapshot = None;
        debug!(name, "persisted config updated, snapshot invalidated");
        Ok(())
    }

    fn build_snapshot(&mut self) -> Result<BTreeMap<String, Value>, ConfigError> {
        if self.persisted.is_none() {
            // load_all degrades to an empty map when the table is absent
            let loaded = self
                .settings
                .load_all()
                .map_err(|e| ConfigError::Database(e.to_string()))?;
            self.persisted = Some(loaded);
        }

        let mut merged = self.defaults.clone();
        merged.extend(self.process.clone());
        merged.extend(self.persisted.as_ref().cloned().unwrap_or_default());
        Ok(merged)
    }
}
