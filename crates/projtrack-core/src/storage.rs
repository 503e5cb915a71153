//! Whole-collection persistence over a generic key-value blob store.
//!
//! The collection is written as one JSON array under a single key. Reading
//! fails soft: a missing key, unreadable blob, or anything that does not
//! parse as an array of projects yields the caller's fallback.

use crate::collection::Collection;
use crate::error::{Result, TrackerError};
use crate::lock::StoreLock;
use crate::model::project::Project;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "design-arena.projects.v1";

const LOCK_TIMEOUT: Duration = Duration::from_secs(2);

/// Minimal key-value blob storage.
pub trait BlobStore {
    /// Read the blob under `key`. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Overwrite the blob under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process blob store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw blob directly, bypassing any serialization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.insert_raw(key, value);
        Ok(())
    }
}

/// Blob store that keeps each key in `<dir>/<key>.json`.
///
/// Writes hold an exclusive advisory lock on `<dir>/.lock` and replace the
/// target through a rename, so a reader never sees a half-written blob.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| TrackerError::io(&self.dir, e))?;
        let _lock = StoreLock::acquire(&self.dir.join(".lock"), LOCK_TIMEOUT)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| TrackerError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| TrackerError::io(&path, e))?;
        Ok(())
    }
}

/// Persistence adapter for the project collection.
#[derive(Debug)]
pub struct Repository<S> {
    store: S,
    key: String,
}

impl<S: BlobStore> Repository<S> {
    /// Repository under [`DEFAULT_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored collection, or `fallback` if there is none usable.
    ///
    /// Never fails: every read or parse problem degrades to `fallback`.
    pub fn load(&self, fallback: Collection) -> Collection {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored collection; using fallback");
                return fallback;
            }
            Err(err) => {
                debug!(key = %self.key, error = %err, "stored collection unreadable; using fallback");
                return fallback;
            }
        };

        if raw.is_empty() {
            debug!(key = %self.key, "stored collection empty; using fallback");
            return fallback;
        }

        match serde_json::from_str::<Vec<Project>>(&raw) {
            Ok(projects) => {
                debug!(key = %self.key, count = projects.len(), "loaded stored collection");
                Collection::new(projects)
            }
            Err(err) => {
                debug!(key = %self.key, error = %err, "stored collection corrupt; using fallback");
                fallback
            }
        }
    }

    /// Serialize the whole collection and overwrite the stored blob.
    pub fn save(&self, collection: &Collection) -> Result<()> {
        let blob = serde_json::to_string(collection.as_slice())?;
        self.store.set(&self.key, &blob)?;
        debug!(key = %self.key, count = collection.len(), version = collection.version(), "saved collection");
        Ok(())
    }
}
