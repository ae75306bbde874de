//! Process-wide in-memory query cache
//!
//! Holds the last successful result of each network query. The handle is
//! cheap to clone; background fetch tasks keep writing into it even after
//! the screen that started them is gone.

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::data::RestaurantList;

/// Query key of the restaurant listing
pub const RESTAURANTS_QUERY: &str = "restaurants";

/// A cached query result
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEntry {
    /// The listing returned by the query
    pub data: RestaurantList,
    /// When the query resolved
    pub updated_at: DateTime<Local>,
}

/// Shared handle to the query results
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<String, QueryEntry>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for `key`, if that query has resolved
    pub fn get(&self, key: &str) -> Option<QueryEntry> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Returns only the data of the cached result for `key`
    pub fn get_data(&self, key: &str) -> Option<RestaurantList> {
        self.get(key).map(|entry| entry.data)
    }

    /// Stores a resolved result, replacing any previous one
    pub fn set(&self, key: &str, data: RestaurantList) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key.to_string(),
                QueryEntry {
                    data,
                    updated_at: Local::now(),
                },
            );
        }
    }
}
