//! Key-value stores for the persisted listing
//!
//! `FileStore` keeps one JSON file per key in an XDG-compliant cache
//! directory. `MemoryStore` holds values in a map; it backs tests and runs
//! where no cache directory can be determined.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// String key-value storage the controller persists through
///
/// Values are opaque strings; callers own the serialization format.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Overwrites the value stored under `key`
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Stores each key as `<key>.json` inside a cache directory
///
/// Uses `~/.cache/dinecache/` on Linux, or the equivalent XDG path on
/// other platforms.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl FileStore {
    /// Creates a FileStore in the platform cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "dinecache")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a FileStore rooted at a custom directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory the store writes into
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.cache_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.ensure_dir()?;

        // Replace atomically via rename
        let path = self.cache_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

/// In-memory store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
