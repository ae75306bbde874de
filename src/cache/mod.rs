//! Persisted snapshot of the last-seen restaurant listing
//!
//! The listing is stored as a bare JSON array under a single fixed key and
//! overwritten wholesale on every save. Reading reports an explicit
//! `CacheLoad` outcome so callers can tell an empty slot from a corrupt one.

mod manager;

pub use manager::{FileStore, KeyValueStore, MemoryStore};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::RestaurantList;

/// Storage key of the listing snapshot
pub const CACHE_KEY: &str = "REACT_QUERY_CACHE";

/// Errors that can occur when writing the snapshot
#[derive(Debug, Error)]
pub enum CacheError {
    /// Store could not be read or written
    #[error("Cache storage failed: {0}")]
    Io(#[from] std::io::Error),

    /// Listing could not be serialized
    #[error("Failed to serialize listing: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome of reading the snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLoad {
    /// A listing was stored and parsed
    Hit(RestaurantList),
    /// Nothing stored under the key
    Empty,
    /// Something is stored but could not be read as a listing
    Corrupt(String),
}

impl CacheLoad {
    /// The listing, if the read was a hit
    pub fn into_list(self) -> Option<RestaurantList> {
        match self {
            CacheLoad::Hit(list) => Some(list),
            CacheLoad::Empty | CacheLoad::Corrupt(_) => None,
        }
    }
}

/// Older snapshot shape; unlike the network body the list is required here
#[derive(Deserialize)]
struct LegacyListing {
    businesses: RestaurantList,
}

/// Accepted on-disk shapes
///
/// Current entries are the bare array. Older entries wrapped it as
/// `{ "businesses": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredListing {
    Bare(RestaurantList),
    Wrapped(LegacyListing),
}

/// Reads the snapshot and reports what was found
pub fn load_cached(store: &dyn KeyValueStore) -> CacheLoad {
    let raw = match store.get(CACHE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CacheLoad::Empty,
        Err(e) => {
            warn!(error = %e, "could not read cached listing");
            return CacheLoad::Corrupt(e.to_string());
        }
    };

    if raw.trim().is_empty() || raw.trim() == "null" {
        return CacheLoad::Empty;
    }

    match serde_json::from_str::<StoredListing>(&raw) {
        Ok(StoredListing::Bare(list)) | Ok(StoredListing::Wrapped(LegacyListing { businesses: list })) => {
            debug!(count = list.len(), "loaded cached listing");
            CacheLoad::Hit(list)
        }
        Err(e) => {
            warn!(error = %e, "cached listing is malformed");
            CacheLoad::Corrupt(e.to_string())
        }
    }
}

/// Reads the snapshot, returning `None` when it is absent or malformed
pub fn load_cached_list(store: &dyn KeyValueStore) -> Option<RestaurantList> {
    load_cached(store).into_list()
}

/// Serializes the listing as a bare array and overwrites the snapshot
pub fn persist_list(store: &dyn KeyValueStore, list: &RestaurantList) -> Result<(), CacheError> {
    let json = serde_json::to_string(list)?;
    store.set(CACHE_KEY, &json)?;
    debug!(count = list.len(), "persisted listing");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Restaurant;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_list() -> RestaurantList {
        let mut first = Restaurant::new("Ravi", "https://example.com/ravi.jpg");
        first.extra.insert("rating".to_string(), json!(4.5));
        vec![first, Restaurant::new("Operation Falafel", "https://example.com/of.jpg")]
    }

    #[test]
    fn test_persist_then_load_roundtrip() {
        let store = MemoryStore::new();
        let list = sample_list();

        persist_list(&store, &list).expect("Persist should succeed");

        assert_eq!(load_cached_list(&store), Some(list));
    }

    #[test]
    fn test_roundtrip_through_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(temp_dir.path().to_path_buf());
        let list = sample_list();

        persist_list(&store, &list).unwrap();

        let reopened = FileStore::with_dir(temp_dir.path().to_path_buf());
        assert_eq!(load_cached(&reopened), CacheLoad::Hit(list));
    }

    #[test]
    fn test_persist_writes_bare_array() {
        let store = MemoryStore::new();

        persist_list(&store, &sample_list()).unwrap();

        let raw = store.get(CACHE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array(), "Snapshot should be the bare list, got {}", raw);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = MemoryStore::new();

        assert_eq!(load_cached(&store), CacheLoad::Empty);
        assert!(load_cached_list(&store).is_none());
    }

    #[test]
    fn test_load_null_is_empty() {
        let store = MemoryStore::new();
        store.set(CACHE_KEY, "null").unwrap();

        assert_eq!(load_cached(&store), CacheLoad::Empty);
    }

    #[test]
    fn test_load_malformed_is_corrupt() {
        let store = MemoryStore::new();
        store.set(CACHE_KEY, "{\"businesses\": [tru").unwrap();

        assert!(matches!(load_cached(&store), CacheLoad::Corrupt(_)));
        assert!(load_cached_list(&store).is_none());
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let store = MemoryStore::new();
        store.set(CACHE_KEY, "42").unwrap();

        assert!(matches!(load_cached(&store), CacheLoad::Corrupt(_)));
    }

    #[test]
    fn test_load_object_without_listing_is_corrupt() {
        let store = MemoryStore::new();

        for raw in [r#"{"unrelated": true}"#, "{}", r#"{"businesses": null}"#] {
            store.set(CACHE_KEY, raw).unwrap();
            assert!(
                matches!(load_cached(&store), CacheLoad::Corrupt(_)),
                "{} should not load as a listing",
                raw
            );
            assert!(load_cached_list(&store).is_none());
        }
    }

    #[test]
    fn test_load_keeps_entry_with_null_fields() {
        let store = MemoryStore::new();
        store
            .set(
                CACHE_KEY,
                r#"[{"name": "Ossiano", "image_url": null, "rating": 4.9}]"#,
            )
            .unwrap();

        let list = load_cached_list(&store).expect("Null fields should not corrupt the entry");
        assert_eq!(list[0].name, "Ossiano");
        assert_eq!(list[0].image_url, "");
    }

    #[test]
    fn test_load_accepts_wrapped_entry() {
        let store = MemoryStore::new();
        store
            .set(
                CACHE_KEY,
                r#"{"businesses": [{"name": "Tresind", "image_url": "https://example.com/t.jpg"}]}"#,
            )
            .unwrap();

        let list = load_cached_list(&store).expect("Wrapped entry should load");
        assert_eq!(list, vec![Restaurant::new("Tresind", "https://example.com/t.jpg")]);
    }

    #[test]
    fn test_persist_overwrites_previous_snapshot() {
        let store = MemoryStore::new();

        persist_list(&store, &sample_list()).unwrap();
        let replacement = vec![Restaurant::new("Only One", "https://example.com/1.jpg")];
        persist_list(&store, &replacement).unwrap();

        assert_eq!(load_cached_list(&store), Some(replacement));
    }
}
