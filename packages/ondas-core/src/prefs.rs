//! Persisted user preference store.
//!
//! The coordinator treats preferences as an opaque get/set-by-key store;
//! format and location belong to the implementation. [`JsonFilePreferences`]
//! is the production store (one JSON file in the app data directory, written
//! atomically on every mutation), [`MemoryPreferences`] backs tests and
//! previews.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};

const PREFS_FILE: &str = "preferences.json";

/// Opaque key-value store for persisted user preferences.
///
/// Mutations take effect immediately and durably (as far as the backing
/// store can guarantee). Writes are not a fallible surface for callers:
/// implementations log failures and keep the in-memory view consistent, so
/// user intent survives the session even when the disk write does not.
pub trait PreferenceStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value);

    /// Removes the value stored under `key`, if any.
    fn remove(&self, key: &str);
}

/// File-backed preference store.
///
/// Keeps the whole preference map in memory and rewrites the backing file on
/// every mutation using a temp-file + rename so a crash mid-write cannot
/// corrupt existing preferences.
pub struct JsonFilePreferences {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
}

impl JsonFilePreferences {
    /// Loads preferences from `preferences.json` in the app data directory.
    ///
    /// A missing or unreadable file yields an empty store; a later mutation
    /// recreates it.
    pub fn load(app_data_dir: &Path) -> Self {
        let path = app_data_dir.join(PREFS_FILE);
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Map::new(),
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// Writes the current map to disk via temp file + atomic rename.
    fn persist(&self, values: &Map<String, Value>) {
        if let Err(e) = self.try_persist(values) {
            log::warn!(
                "[Preferences] Failed to write {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn try_persist(&self, values: &Map<String, Value>) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(values)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, &self.path)
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value);
        self.persist(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock();
        if values.remove(key).is_some() {
            self.persist(&values);
        }
    }
}

/// In-memory preference store for tests and UI previews.
///
/// Same visible behavior as the file-backed store, nothing survives the
/// process.
#[derive(Default)]
pub struct MemoryPreferences {
    values: Mutex<Map<String, Value>>,
}

impl MemoryPreferences {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.values.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }
}
