//! Caught-list persistence behind a key-value storage capability.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Storage key holding the JSON-encoded array of caught names.
pub const CAUGHT_KEY: &str = "caughtPokemons";

/// Durable key-value access. Injected so tests can swap the filesystem for
/// an in-memory map.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        (**self).remove(key)
    }
}

/// One file per key under a data directory.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn default_root() -> PathBuf {
        let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("pokedex-tui")
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        std::fs::create_dir_all(&self.root)
            .map_err(|err| format!("Failed to create data directory: {err}"))?;
        std::fs::write(self.key_path(key), value)
            .map_err(|err| format!("Failed to write {key}: {err}"))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(format!("Failed to remove {key}: {err}")),
        }
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().map_err(|_| "storage poisoned".to_string())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().map_err(|_| "storage poisoned".to_string())?;
        entries.remove(key);
        Ok(())
    }
}

/// The caught list on top of a storage backend. The full list is rewritten
/// on every mutation; an absent or unreadable key reads as empty.
pub struct CaughtStore {
    storage: Box<dyn Storage>,
}

impl CaughtStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> Vec<String> {
        let Some(raw) = self.storage.get(CAUGHT_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    pub fn save(&self, names: &[String]) -> Result<(), String> {
        let json = serde_json::to_string(names)
            .map_err(|err| format!("Failed to encode caught list: {err}"))?;
        self.storage.set(CAUGHT_KEY, &json)
    }

    pub fn clear(&self) -> Result<(), String> {
        self.storage.remove(CAUGHT_KEY)
    }
}
