use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::document::Document;

/// Errors that can occur during document persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize document: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access storage: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid document data: {0}")]
    InvalidState(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A durable string slot keyed by name.
pub trait KeyValueStore {
    /// Short name of the backend for log messages
    fn name(&self) -> &'static str;

    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Overwrite the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()>;

    /// Delete `key`; deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> PersistenceResult<()>;
}

/// In-process store. Clones share the same map, so a test can keep a handle and
/// inspect what the editor wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under `key`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.slots.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.slots.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per slot inside a directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store inside eframe's per-app data directory.
    pub fn for_app(app_id: &str) -> PersistenceResult<Self> {
        eframe::storage_dir(app_id)
            .map(Self::new)
            .ok_or_else(|| PersistenceError::Unavailable("no data directory for this user".to_owned()))
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn temp_path(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{key}.json.tmp"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes a sibling temp file and renames it over the slot, so a crash
    /// mid-write leaves the previous blob intact.
    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let temp = self.temp_path(key);
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, self.path(key))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        match std::fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// The browser's `window.localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> PersistenceResult<Self> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| PersistenceError::Unavailable("localStorage is not accessible".to_owned()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: eframe::wasm_bindgen::JsValue) -> PersistenceError {
    PersistenceError::Unavailable(format!("{err:?}"))
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn name(&self) -> &'static str {
        "localStorage"
    }

    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

/// What the store found at startup.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing was saved yet
    Empty,
    Loaded(Document),
    /// Something was saved but could not be read back; the session starts empty
    Recovered { reason: String },
}

/// Reads and writes the whole document under one fixed key, last write wins.
pub struct DocumentStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    writes: usize,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("backend", &self.backend.name())
            .field("key", &self.key)
            .field("writes", &self.writes)
            .finish()
    }
}

impl DocumentStore {
    pub fn new(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            writes: 0,
        }
    }

    /// The durable store for this platform, falling back to memory if it is unavailable.
    pub fn platform_default(app_id: &str, key: &str) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let backend = FileStore::for_app(app_id).map(|store| Box::new(store) as Box<dyn KeyValueStore>);
        #[cfg(target_arch = "wasm32")]
        let backend = {
            let _ = app_id;
            LocalStorage::open().map(|store| Box::new(store) as Box<dyn KeyValueStore>)
        };

        match backend {
            Ok(backend) => Self::new(backend, key),
            Err(err) => {
                log::warn!("Falling back to in-memory storage: {}", err);
                Self::new(Box::new(MemoryStore::new()), key)
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of successful saves since this store was created
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn load(&self) -> LoadOutcome {
        let json = match self.backend.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return LoadOutcome::Empty,
            Err(err) => {
                return LoadOutcome::Recovered {
                    reason: err.to_string(),
                };
            }
        };

        match Document::from_json(&json) {
            Ok(document) => {
                log::info!(
                    "Loaded {} shapes from {} storage",
                    document.len(),
                    self.backend.name()
                );
                LoadOutcome::Loaded(document)
            }
            Err(err) => LoadOutcome::Recovered {
                reason: PersistenceError::InvalidState(err.to_string()).to_string(),
            },
        }
    }

    /// Serialize the whole document over the previous blob.
    pub fn save(&mut self, document: &Document) -> PersistenceResult<()> {
        let json = document.to_json()?;
        self.backend.set(&self.key, &json)?;
        self.writes += 1;
        log::debug!("Saved {} shapes ({} bytes)", document.len(), json.len());
        Ok(())
    }

    /// Delete the persisted blob entirely.
    pub fn erase(&mut self) -> PersistenceResult<()> {
        self.backend.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Style, factory};
    use egui::Pos2;

    #[test]
    fn missing_slot_loads_empty() {
        let store = DocumentStore::new(Box::new(MemoryStore::new()), "k");
        assert!(matches!(store.load(), LoadOutcome::Empty));
    }

    #[test]
    fn garbage_is_recovered_not_fatal() {
        let store = DocumentStore::new(Box::new(MemoryStore::with_value("k", "{not json")), "k");
        assert!(matches!(store.load(), LoadOutcome::Recovered { .. }));
    }

    #[test]
    fn save_overwrites_and_counts() {
        let memory = MemoryStore::new();
        let mut store = DocumentStore::new(Box::new(memory.clone()), "k");
        let mut doc = Document::new();
        store.save(&doc).unwrap();
        doc.add(factory::circle(Pos2::ZERO, 3.0, Style::default()));
        store.save(&doc).unwrap();

        assert_eq!(store.write_count(), 2);
        let saved = Document::from_json(&memory.raw("k").unwrap()).unwrap();
        assert_eq!(saved, doc);

        store.erase().unwrap();
        assert!(memory.raw("k").is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_remove_missing_is_ok() {
        let dir = std::env::temp_dir().join(format!("infinite_canvas_test_{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert!(store.get("absent").unwrap().is_none());
        store.set("slot", "{}").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("{}"));
        store.remove("slot").unwrap();
        store.remove("slot").unwrap();
        let _ = std::fs::remove_dir_all(dir);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_replaces_slot_without_leftovers() {
        let dir = std::env::temp_dir().join(format!("infinite_canvas_swap_{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        store.set("slot", "first").unwrap();
        store.set("slot", "second").unwrap();

        assert_eq!(store.get("slot").unwrap().as_deref(), Some("second"));
        assert!(!dir.join("slot.json.tmp").exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
