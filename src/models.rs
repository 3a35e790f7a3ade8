//! Data structures for filmtui
//!
//! Shared models for the TV 2 Play content feed:
//! - **MediaItem**: one film/series entry as the API describes it
//! - **Category**: an ordered section of items with an optional title
//! - **RawFeed**: the wire form of one `feeds` element before normalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display fallback for items without a title
pub const UNTITLED: &str = "Untitled";

/// Display fallback for categories without a title
pub const DEFAULT_CATEGORY_TITLE: &str = "Movies";

/// Card descriptions are truncated to this many characters in list views
pub const CARD_DESCRIPTION_LIMIT: usize = 100;

// =============================================================================
// Image Reference
// =============================================================================

/// Artwork reference as delivered by the API
///
/// Upstream payloads carry either `src` or `url`; `src` wins when both are
/// present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ImageRef {
    /// Effective source URL (`src`, falling back to `url`)
    pub fn source(&self) -> Option<&str> {
        self.src.as_deref().or(self.url.as_deref())
    }
}

// =============================================================================
// Year
// =============================================================================

/// Release year, which the API sends as either a number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => write!(f, "{}", s),
        }
    }
}

// =============================================================================
// Media Item
// =============================================================================

/// One film or series entry
///
/// Every field is optional on the wire. The identifying `path` (field name
/// `path` or `url` depending on the payload) is what the detail endpoint is
/// keyed by; items without one cannot be opened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(default, alias = "url", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl MediaItem {
    /// Title for display, defaulting when absent
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
    }

    /// Whether the item carries a non-empty identifying path
    pub fn is_navigable(&self) -> bool {
        self.path.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Artwork source URL, if any
    pub fn poster_source(&self) -> Option<&str> {
        self.image.as_ref().and_then(ImageRef::source)
    }

    /// Description truncated for card display
    pub fn card_description(&self) -> Option<String> {
        let text = self.description.as_deref()?;
        if text.chars().count() > CARD_DESCRIPTION_LIMIT {
            let truncated: String = text.chars().take(CARD_DESCRIPTION_LIMIT).collect();
            Some(format!("{}...", truncated))
        } else {
            Some(text.to_string())
        }
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self
            .year
            .as_ref()
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        write!(f, "{}{}", self.display_title(), year_str)
    }
}

// =============================================================================
// Category
// =============================================================================

/// An ordered section of items, as rendered in the browse view
///
/// The normalizer never produces a category with zero items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub title: Option<String>,
    pub items: Vec<MediaItem>,
}

impl Category {
    /// Section title for display, defaulting when absent
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CATEGORY_TITLE)
    }

    /// Count caption shown next to the title ("1 film" / "5 films")
    pub fn count_caption(&self) -> String {
        let n = self.items.len();
        if n == 1 {
            "1 film".to_string()
        } else {
            format!("{} films", n)
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_title(), self.count_caption())
    }
}

// =============================================================================
// Raw Feed Section
// =============================================================================

/// Wire form of one element of the top-level `feeds` array
///
/// Section titles come as `section_title` or `title`; the item list under
/// `content` is kept untyped here so malformed entries can be skipped one by
/// one during normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeed {
    #[serde(default)]
    pub section_title: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<serde_json::Value>>,
}

// =============================================================================
// Unit Tests
// =============================================================================
