//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout; the browse
//! and detail views each render the full loading/error/empty/success set.

pub mod browser;
pub mod detail;
pub mod theme;

pub use theme::Theme;
