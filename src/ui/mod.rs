//! UI rendering module for dinecache
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod home;
pub mod restaurant_detail;
pub mod restaurant_list;

use ratatui::Frame;

use crate::app::App;
use crate::navigation::Route;

/// Renders the current screen, plus the help overlay when it is open
pub fn render(frame: &mut Frame, app: &App) {
    match app.route() {
        Route::Home => home::render(frame, app),
        Route::Restaurants => restaurant_list::render(frame, app),
        Route::Details { restaurant } => restaurant_detail::render(frame, app, restaurant),
    }

    if app.show_help {
        help_overlay::render(frame);
    }
}
