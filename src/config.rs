//! Configuration management for filmtui
//!
//! Handles config file loading/saving. Config is stored at
//! ~/.config/filmtui/config.toml; everything in it is optional.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::client::{CARD_POSTER, DEFAULT_BASE_URL};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Content API base URL override
    pub base_url: Option<String>,
    /// Poster width for CLI output (defaults to the card size)
    pub poster_width: Option<u32>,
    /// Poster height for CLI output (defaults to the card size)
    pub poster_height: Option<u32>,
    /// Open the TUI in the flat grid layout instead of sections
    pub start_in_grid: Option<bool>,
}

impl Config {
    /// Get config file path (~/.config/filmtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("filmtui").join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path =
            Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Effective base URL with fallback chain:
    /// 1. Environment variable FILMTUI_BASE_URL
    /// 2. Config file value
    /// 3. Built-in production URL
    pub fn effective_base_url(&self) -> String {
        if let Ok(url) = std::env::var("FILMTUI_BASE_URL") {
            return url;
        }
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Poster dimensions for CLI output
    pub fn poster_dimensions(&self) -> (u32, u32) {
        (
            self.poster_width.unwrap_or(CARD_POSTER.0),
            self.poster_height.unwrap_or(CARD_POSTER.1),
        )
    }

    /// Whether the TUI starts in the grid layout
    pub fn start_in_grid(&self) -> bool {
        self.start_in_grid.unwrap_or(false)
    }
}
