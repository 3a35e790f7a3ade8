//! filmtui - Terminal client for the TV 2 Play film catalogue
//!
//! Browse the categorized film feed, open a title for its details,
//! straight from the terminal.
//!
//! # Modules
//!
//! - `models` - Data structures for feed items and categories
//! - `feed` - Response shape classification and normalization
//! - `route` - Route segments and path encoding
//! - `api` - Content API client
//! - `app` - View state controllers and keyboard handling
//! - `ui` - TUI components
//! - `logging` - Injected observability for the controllers

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod feed;
pub mod logging;
pub mod models;
pub mod route;
pub mod ui;

// Re-export commonly used types
pub use api::{build_poster_url, ApiError, PlayClient};
pub use app::{App, BrowseController, Command, DetailController, FetchTicket, ViewState};
pub use models::{Category, ImageRef, MediaItem, Year};
pub use route::{decode_path, encode_path, DecodeError, Route};
