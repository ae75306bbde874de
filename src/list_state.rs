//! Displayed-listing state machine
//!
//! Merges the two asynchronous sources of the listing, the persisted
//! snapshot and the network fetch. Network data always takes precedence:
//! once a fetch has succeeded, a late snapshot read can no longer replace it,
//! and a later fetch failure keeps the fresh data on screen.

use crate::data::RestaurantList;

/// What the list screen currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
    /// Nothing cached and nothing fetched yet
    #[default]
    Empty,
    /// Showing the persisted snapshot, fetch not resolved yet
    CachedOnly(RestaurantList),
    /// Showing the result of a successful fetch
    Fresh(RestaurantList),
    /// The fetch failed before any fresh data arrived
    Error {
        /// Human-readable failure
        message: String,
        /// Snapshot still on screen, if any
        stale: Option<RestaurantList>,
    },
}

impl ListState {
    /// A persisted snapshot was read
    pub fn on_cache_loaded(self, list: RestaurantList) -> Self {
        match self {
            ListState::Empty | ListState::CachedOnly(_) => ListState::CachedOnly(list),
            ListState::Fresh(fresh) => ListState::Fresh(fresh),
            ListState::Error { message, .. } => ListState::Error {
                message,
                stale: Some(list),
            },
        }
    }

    /// A fetch resolved with a listing
    pub fn on_fetch_succeeded(self, list: RestaurantList) -> Self {
        ListState::Fresh(list)
    }

    /// A fetch (including all of its retries) failed
    pub fn on_fetch_failed(self, message: impl Into<String>) -> Self {
        match self {
            ListState::Fresh(fresh) => ListState::Fresh(fresh),
            ListState::Empty => ListState::Error {
                message: message.into(),
                stale: None,
            },
            ListState::CachedOnly(list) => ListState::Error {
                message: message.into(),
                stale: Some(list),
            },
            ListState::Error { stale, .. } => ListState::Error {
                message: message.into(),
                stale,
            },
        }
    }

    /// The listing to render, if any
    pub fn restaurants(&self) -> Option<&RestaurantList> {
        match self {
            ListState::Empty => None,
            ListState::CachedOnly(list) | ListState::Fresh(list) => Some(list),
            ListState::Error { stale, .. } => stale.as_ref(),
        }
    }

    /// Number of restaurants on screen
    pub fn len(&self) -> usize {
        self.restaurants().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Error message to surface, if the state is `Error`
    pub fn error(&self) -> Option<&str> {
        match self {
            ListState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether the displayed data came from the network
    pub fn is_fresh(&self) -> bool {
        matches!(self, ListState::Fresh(_))
    }

    /// Short label for the header
    pub fn label(&self) -> &'static str {
        match self {
            ListState::Empty => "empty",
            ListState::CachedOnly(_) => "cached",
            ListState::Fresh(_) => "fresh",
            ListState::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Restaurant;

    fn list(names: &[&str]) -> RestaurantList {
        names
            .iter()
            .map(|n| Restaurant::new(*n, format!("https://example.com/{}.jpg", n)))
            .collect()
    }

    #[test]
    fn test_default_is_empty() {
        let state = ListState::default();
        assert_eq!(state, ListState::Empty);
        assert!(state.restaurants().is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_cache_then_fetch_shows_fetched() {
        let state = ListState::Empty
            .on_cache_loaded(list(&["old"]))
            .on_fetch_succeeded(list(&["new"]));

        assert_eq!(state, ListState::Fresh(list(&["new"])));
    }

    #[test]
    fn test_fetch_then_late_cache_keeps_fetched() {
        let state = ListState::Empty
            .on_fetch_succeeded(list(&["new"]))
            .on_cache_loaded(list(&["old"]));

        assert_eq!(state.restaurants(), Some(&list(&["new"])));
        assert!(state.is_fresh());
    }

    #[test]
    fn test_cache_only_shows_cache() {
        let state = ListState::Empty.on_cache_loaded(list(&["a", "b"]));

        assert_eq!(state.restaurants(), Some(&list(&["a", "b"])));
        assert_eq!(state.len(), 2);
        assert_eq!(state.label(), "cached");
    }

    #[test]
    fn test_failure_keeps_stale_cache_visible() {
        let state = ListState::Empty
            .on_cache_loaded(list(&["stale"]))
            .on_fetch_failed("offline");

        assert_eq!(state.error(), Some("offline"));
        assert_eq!(state.restaurants(), Some(&list(&["stale"])));
    }

    #[test]
    fn test_failure_without_cache_shows_nothing() {
        let state = ListState::Empty.on_fetch_failed("timeout");

        assert_eq!(state.error(), Some("timeout"));
        assert!(state.restaurants().is_none());
    }

    #[test]
    fn test_failure_after_fresh_keeps_fresh() {
        let state = ListState::Empty
            .on_fetch_succeeded(list(&["fresh"]))
            .on_fetch_failed("refetch failed");

        assert_eq!(state, ListState::Fresh(list(&["fresh"])));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_error_recovers_on_success() {
        let state = ListState::Empty
            .on_fetch_failed("first")
            .on_fetch_succeeded(list(&["ok"]));

        assert_eq!(state, ListState::Fresh(list(&["ok"])));
    }

    #[test]
    fn test_cache_after_error_fills_stale() {
        let state = ListState::Empty
            .on_fetch_failed("down")
            .on_cache_loaded(list(&["late"]));

        assert_eq!(state.error(), Some("down"));
        assert_eq!(state.restaurants(), Some(&list(&["late"])));
    }

    #[test]
    fn test_repeated_failure_keeps_stale_and_updates_message() {
        let state = ListState::Empty
            .on_cache_loaded(list(&["s"]))
            .on_fetch_failed("one")
            .on_fetch_failed("two");

        assert_eq!(state.error(), Some("two"));
        assert_eq!(state.restaurants(), Some(&list(&["s"])));
    }
}
