//! dinecache library
//!
//! Restaurant listing browser with a persisted snapshot that is shown
//! instantly and replaced by fresh network data once it arrives.

pub mod app;
pub mod cache;
pub mod cli;
pub mod controller;
pub mod data;
pub mod list_state;
pub mod logging;
pub mod navigation;
pub mod query;
pub mod ui;
