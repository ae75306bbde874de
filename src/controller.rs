//! Cache-and-fetch controller
//!
//! Produces the single listing the list screen observes. On start it shows
//! the persisted snapshot, then starts a background fetch whose result
//! supersedes it. When the list screen unmounts, whatever the query cache
//! holds is written back as the new snapshot.

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::{self, CacheError, CacheLoad, KeyValueStore};
use crate::data::{FetchError, RestaurantClient, RestaurantList};
use crate::list_state::ListState;
use crate::query::{QueryCache, RESTAURANTS_QUERY};

/// Retry policy of the background query
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Extra attempts after the first failure
    pub retries: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Messages sent from the background fetch to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    /// The fetch resolved with a listing
    Succeeded(RestaurantList),
    /// Every attempt failed; carries the last error
    Failed(String),
}

/// Coordinates the persisted snapshot with the live fetch
pub struct Controller {
    /// Where the snapshot is persisted
    store: Arc<dyn KeyValueStore>,
    /// Network client; `None` runs offline
    client: Option<RestaurantClient>,
    /// Shared results of resolved queries
    query_cache: QueryCache,
    policy: FetchPolicy,
    state: ListState,
    is_loading: bool,
    last_error: Option<String>,
    last_updated: Option<DateTime<Local>>,
    sender: mpsc::Sender<FetchEvent>,
    receiver: mpsc::Receiver<FetchEvent>,
}

impl Controller {
    /// Creates a controller; nothing is read or fetched until `start`
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        client: Option<RestaurantClient>,
        query_cache: QueryCache,
        policy: FetchPolicy,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(8);
        Self {
            store,
            client,
            query_cache,
            policy,
            state: ListState::Empty,
            is_loading: false,
            last_error: None,
            last_updated: None,
            sender,
            receiver,
        }
    }

    /// Shows the persisted snapshot and starts the background fetch
    ///
    /// Must be called from within a tokio runtime when a client is set.
    pub fn start(&mut self) {
        match cache::load_cached(self.store.as_ref()) {
            CacheLoad::Hit(list) => {
                info!(count = list.len(), "showing cached listing");
                self.state = std::mem::take(&mut self.state).on_cache_loaded(list);
            }
            CacheLoad::Empty => debug!("no cached listing"),
            CacheLoad::Corrupt(reason) => warn!(%reason, "ignoring corrupt cached listing"),
        }

        self.refetch();
    }

    /// Reads the persisted snapshot; `None` when absent or malformed
    pub fn load_cached_list(&self) -> Option<RestaurantList> {
        cache::load_cached_list(self.store.as_ref())
    }

    /// Fetches the listing once, without retry
    pub async fn fetch_remote_list(&self) -> Result<RestaurantList, FetchError> {
        match &self.client {
            Some(client) => client.fetch_restaurants().await,
            None => Err(FetchError::Offline),
        }
    }

    /// Overwrites the persisted snapshot
    pub fn persist_list(&self, list: &RestaurantList) -> Result<(), CacheError> {
        cache::persist_list(self.store.as_ref(), list)
    }

    /// Starts a background fetch unless one is in flight or running offline
    ///
    /// Returns whether a fetch was started.
    pub fn refetch(&mut self) -> bool {
        let Some(client) = self.client.clone() else {
            debug!("offline, not fetching");
            return false;
        };
        if self.is_loading {
            debug!("fetch already in flight");
            return false;
        }

        self.is_loading = true;
        let tx = self.sender.clone();
        let query_cache = self.query_cache.clone();
        let policy = self.policy.clone();

        tokio::spawn(async move {
            let event = fetch_with_retry(&client, &policy, &query_cache).await;
            // Receiver is gone once the controller is dropped; the query cache is still updated
            let _ = tx.send(event).await;
        });

        true
    }

    /// Applies pending fetch results without blocking
    ///
    /// Returns `true` if any event was applied.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.receiver.try_recv() {
            self.handle_event(event);
            changed = true;
        }
        changed
    }

    /// Waits for the next fetch result and applies it
    pub async fn wait_for_fetch(&mut self) -> Option<FetchEvent> {
        let event = self.receiver.recv().await?;
        self.handle_event(event.clone());
        Some(event)
    }

    /// Applies one fetch result to the displayed state
    pub fn handle_event(&mut self, event: FetchEvent) {
        self.is_loading = false;
        let state = std::mem::take(&mut self.state);
        self.state = match event {
            FetchEvent::Succeeded(list) => {
                self.last_error = None;
                self.last_updated = Some(Local::now());
                state.on_fetch_succeeded(list)
            }
            FetchEvent::Failed(message) => {
                self.last_error = Some(message.clone());
                state.on_fetch_failed(message)
            }
        };
    }

    /// Writes the query cache's listing as the new snapshot
    ///
    /// Called when the list screen leaves the navigation stack. Returns
    /// `Ok(false)` without touching the store if no fetch has resolved yet.
    pub fn persist_on_unmount(&self) -> Result<bool, CacheError> {
        let Some(list) = self.query_cache.get_data(RESTAURANTS_QUERY) else {
            debug!("list unmounted before any fetch resolved, nothing to persist");
            return Ok(false);
        };

        self.persist_list(&list)?;
        info!(count = list.len(), "persisted listing on unmount");
        Ok(true)
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Listing currently on screen
    pub fn restaurants(&self) -> Option<&RestaurantList> {
        self.state.restaurants()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Error of the last fetch, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When fresh data last arrived
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    pub fn query_cache(&self) -> &QueryCache {
        &self.query_cache
    }
}

/// Runs the query with the policy's retries, recording success in the query cache
async fn fetch_with_retry(
    client: &RestaurantClient,
    policy: &FetchPolicy,
    query_cache: &QueryCache,
) -> FetchEvent {
    let mut attempt = 0;
    loop {
        match client.fetch_restaurants().await {
            Ok(list) => {
                info!(count = list.len(), attempt, "fetched listing");
                query_cache.set(RESTAURANTS_QUERY, list.clone());
                return FetchEvent::Succeeded(list);
            }
            Err(e) if attempt < policy.retries => {
                warn!(error = %e, attempt, "fetch failed, retrying");
                attempt += 1;
                tokio::time::sleep(policy.retry_delay).await;
            }
            Err(e) => {
                warn!(error = %e, attempt, "fetch failed");
                return FetchEvent::Failed(e.to_string());
            }
        }
    }
}
