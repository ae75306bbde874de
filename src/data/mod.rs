//! Core data models for the restaurant browser
//!
//! This module contains the restaurant listing types shared by the cache,
//! the controller and the UI, plus the HTTP client that fetches them.

pub mod restaurants;

pub use restaurants::{FetchError, RestaurantClient, DEFAULT_RESTAURANTS_URL};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single restaurant entry from the remote listing
///
/// Only `name` and `image_url` are interpreted. Every other field the
/// remote sends (rating, location, categories, ...) is kept in `extra`
/// and written back unchanged when the list is cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Display name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// URI of the cover image
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    /// Uninterpreted passthrough fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Restaurant {
    /// Creates a restaurant with no passthrough fields
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
            extra: Map::new(),
        }
    }

    /// Pretty JSON of every field, used by the detail screen
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// Reads a JSON `null` string field as empty
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered restaurant listing; identity is the position in the list
pub type RestaurantList = Vec<Restaurant>;

/// Body of the remote listing resource: `{ "businesses": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessesResponse {
    /// The listing; absent in the body means empty
    #[serde(default)]
    pub businesses: RestaurantList,
}
