//! Application state management for dinecache
//!
//! This module contains the main application state, handling keyboard input,
//! screen transitions and the list screen's mount/unmount lifecycle.

use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{FileStore, KeyValueStore, MemoryStore};
use crate::cli::StartupConfig;
use crate::controller::Controller;
use crate::data::{Restaurant, RestaurantClient};
use crate::navigation::{NavigationStack, Route};
use crate::query::QueryCache;

/// Main application struct managing state and data
pub struct App {
    /// Open screens
    pub navigation: NavigationStack,
    /// Index of currently selected restaurant in the list
    pub selected_index: usize,
    /// Scroll offset for the detail view
    pub detail_scroll_offset: u16,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Source of the displayed listing
    pub controller: Controller,
}

impl App {
    /// Creates an App from the startup configuration
    ///
    /// The snapshot is stored under `cache_dir` if given, else the XDG cache
    /// directory, else in memory only.
    pub fn new(config: &StartupConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match config.cache_dir.clone() {
            Some(dir) => Arc::new(FileStore::with_dir(dir)),
            None => match FileStore::new() {
                Some(store) => Arc::new(store),
                None => {
                    warn!("no cache directory available, snapshot will not persist");
                    Arc::new(MemoryStore::new())
                }
            },
        };
        let client = config.url.clone().map(RestaurantClient::with_url);
        let controller = Controller::new(
            store,
            client,
            QueryCache::new(),
            config.fetch_policy.clone(),
        );
        Self::with_controller(controller)
    }

    /// Creates an App around an existing controller
    pub fn with_controller(controller: Controller) -> Self {
        Self {
            navigation: NavigationStack::new(),
            selected_index: 0,
            detail_scroll_offset: 0,
            should_quit: false,
            show_help: false,
            controller,
        }
    }

    /// Current screen
    pub fn route(&self) -> &Route {
        self.navigation.current()
    }

    /// Returns the number of restaurants on screen
    pub fn restaurant_count(&self) -> usize {
        self.controller.state().len()
    }

    /// Returns the currently selected restaurant, if any
    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.controller
            .restaurants()
            .and_then(|list| list.get(self.selected_index))
    }

    /// Applies finished background fetches; returns whether anything changed
    pub fn tick(&mut self) -> bool {
        let changed = self.controller.poll();
        if changed {
            self.clamp_selection();
        }
        changed
    }

    /// Opens the restaurant list, starting at the top when newly mounted
    pub fn open_list(&mut self) {
        if !self.navigation.contains(Route::Restaurants.name()) {
            self.selected_index = 0;
        }
        let removed = self.navigation.navigate(Route::Restaurants);
        self.after_removed(&removed);
    }

    /// Opens the detail screen for the selected restaurant
    pub fn open_selected(&mut self) {
        if let Some(restaurant) = self.selected_restaurant().cloned() {
            debug!(name = %restaurant.name, "opening details");
            self.detail_scroll_offset = 0;
            self.navigation.push(Route::Details { restaurant });
        }
    }

    /// Leaves the current screen
    pub fn go_back(&mut self) {
        if let Some(route) = self.navigation.pop() {
            if matches!(route, Route::Details { .. }) {
                self.detail_scroll_offset = 0;
            }
            self.after_removed(&[route]);
        }
    }

    /// Unmounts every open screen and flags the app to exit
    pub fn quit(&mut self) {
        let removed = self.navigation.navigate(Route::Home);
        self.after_removed(&removed);
        self.should_quit = true;
    }

    /// Persists the listing if the list screen was among the removed screens
    fn after_removed(&mut self, removed: &[Route]) {
        if removed.iter().any(|r| matches!(r, Route::Restaurants)) {
            self.on_list_unmount();
        }
    }

    /// List screen left the stack
    fn on_list_unmount(&self) {
        if let Err(e) = self.controller.persist_on_unmount() {
            warn!(error = %e, "could not persist listing on unmount");
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `Enter` (Home): Open the restaurant list
    /// - `Up`/`k`, `Down`/`j` (list): Move selection
    /// - `Enter` (list): Open details for the selected restaurant
    /// - `r` (list): Refetch the listing
    /// - `Up`/`k`, `Down`/`j` (details): Scroll
    /// - `Esc`: Go back (quits from Home)
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.navigation.current() {
            Route::Home => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit(),
                KeyCode::Enter | KeyCode::Char('l') => self.open_list(),
                KeyCode::Char('?') => self.show_help = true,
                _ => {}
            },
            Route::Restaurants => match key_event.code {
                KeyCode::Char('q') => self.quit(),
                KeyCode::Esc => self.go_back(),
                KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
                KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
                KeyCode::Enter => self.open_selected(),
                KeyCode::Char('r') => {
                    self.controller.refetch();
                }
                KeyCode::Char('?') => self.show_help = true,
                _ => {}
            },
            Route::Details { .. } => match key_event.code {
                KeyCode::Char('q') => self.quit(),
                KeyCode::Esc => self.go_back(),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
                KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
                KeyCode::Char('g') => self.detail_scroll_offset = 0,
                KeyCode::Char('?') => self.show_help = true,
                _ => {}
            },
        }
    }

    /// Moves the selection up in the list, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.restaurant_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the list, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.restaurant_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Keeps the selection inside the list after it was replaced
    fn clamp_selection(&mut self) {
        let count = self.restaurant_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Scrolls up in the detail view, stopping at 0
    pub fn scroll_up(&mut self) {
        self.detail_scroll_offset = self.detail_scroll_offset.saturating_sub(1);
    }

    /// Scrolls down in the detail view; the renderer clamps to content height
    pub fn scroll_down(&mut self) {
        const MAX_SCROLL: u16 = 500;
        if self.detail_scroll_offset < MAX_SCROLL {
            self.detail_scroll_offset += 1;
        }
    }
}
