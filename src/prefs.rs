//! Search form preferences kept in durable client storage.

use crate::models::SearchPreferences;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key/value string storage with `localStorage` semantics
pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Read the stored preferences; unreadable or malformed data yields empty preferences
pub fn load_preferences(store: &impl PreferenceStore, key: &str) -> SearchPreferences {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return SearchPreferences::default(),
        Err(err) => {
            warn!("Error loading search preferences: {:#}", err);
            return SearchPreferences::default();
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("Error loading search preferences: {}", err);
            return SearchPreferences::default();
        }
    };
    let Some(fields) = value.as_object() else {
        warn!("Error loading search preferences: expected an object, got {}", value);
        return SearchPreferences::default();
    };

    // each field stands alone; a mistyped one does not discard its sibling
    let field = |name: &str| fields.get(name).and_then(Value::as_str).map(str::to_string);
    SearchPreferences {
        town: field("town"),
        flat_type: field("flatType"),
    }
}

/// Overwrite the stored preferences
pub fn save_preferences(
    store: &mut impl PreferenceStore,
    key: &str,
    prefs: &SearchPreferences,
) -> Result<()> {
    let raw = serde_json::to_string(prefs).context("Failed to serialize search preferences")?;
    debug!("Saving search preferences {}", raw);
    store.set_item(key, &raw)
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

impl PreferenceStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all().unwrap_or_else(|err| {
            warn!("Discarding unreadable storage file: {:#}", err);
            HashMap::new()
        });
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&items)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PREFERENCES_KEY;

    #[test]
    fn round_trips_through_reload() {
        let mut store = MemoryStore::default();
        let prefs = SearchPreferences::from_form(Some("Bishan"), Some("4 ROOM"));
        save_preferences(&mut store, PREFERENCES_KEY, &prefs).unwrap();

        let loaded = load_preferences(&store, PREFERENCES_KEY);
        assert_eq!(loaded.town(), Some("Bishan"));
        assert_eq!(loaded.flat_type(), Some("4 ROOM"));
    }

    #[test]
    fn missing_key_is_empty() {
        let store = MemoryStore::default();
        assert_eq!(load_preferences(&store, PREFERENCES_KEY), SearchPreferences::default());
    }

    #[test]
    fn malformed_json_is_empty() {
        let mut store = MemoryStore::default();
        for raw in ["{town:", "null", r#"{"town": 5}"#] {
            store.set_item(PREFERENCES_KEY, raw).unwrap();
            let loaded = load_preferences(&store, PREFERENCES_KEY);
            assert_eq!(loaded.town(), None);
            assert_eq!(loaded.flat_type(), None);
        }
    }

    #[test]
    fn mistyped_field_keeps_its_sibling() {
        let mut store = MemoryStore::default();
        store
            .set_item(PREFERENCES_KEY, r#"{"town": 5, "flatType": "4 ROOM"}"#)
            .unwrap();
        let loaded = load_preferences(&store, PREFERENCES_KEY);
        assert_eq!(loaded.town(), None);
        assert_eq!(loaded.flat_type(), Some("4 ROOM"));
    }

    #[test]
    fn non_object_json_is_empty() {
        let mut store = MemoryStore::default();
        for raw in ["[]", r#""Bishan""#, "42", "true"] {
            store.set_item(PREFERENCES_KEY, raw).unwrap();
            assert_eq!(load_preferences(&store, PREFERENCES_KEY), SearchPreferences::default());
        }
    }

    #[test]
    fn partial_object_applies_present_fields_only() {
        let mut store = MemoryStore::default();
        store.set_item(PREFERENCES_KEY, r#"{"flatType":"5 ROOM"}"#).unwrap();
        let loaded = load_preferences(&store, PREFERENCES_KEY);
        assert_eq!(loaded.town(), None);
        assert_eq!(loaded.flat_type(), Some("5 ROOM"));
    }

    #[test]
    fn save_overwrites_wholesale() {
        let mut store = MemoryStore::default();
        let first = SearchPreferences::from_form(Some("Bishan"), Some("4 ROOM"));
        save_preferences(&mut store, PREFERENCES_KEY, &first).unwrap();
        let second = SearchPreferences::from_form(None, Some("3 ROOM"));
        save_preferences(&mut store, PREFERENCES_KEY, &second).unwrap();

        assert_eq!(
            store.get_item(PREFERENCES_KEY).unwrap().as_deref(),
            Some(r#"{"town":"","flatType":"3 ROOM"}"#)
        );
    }

    #[test]
    fn file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::new(&path);
        let prefs = SearchPreferences::from_form(Some("Clementi"), Some("4 ROOM"));
        save_preferences(&mut store, PREFERENCES_KEY, &prefs).unwrap();
        store.set_item("other", "kept").unwrap();

        let reopened = FileStore::new(&path);
        let loaded = load_preferences(&reopened, PREFERENCES_KEY);
        assert_eq!(loaded.town(), Some("Clementi"));
        assert_eq!(reopened.get_item("other").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(load_preferences(&store, PREFERENCES_KEY), SearchPreferences::default());
    }
}
