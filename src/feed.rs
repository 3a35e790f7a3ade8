//! Feed normalization
//!
//! The collection endpoint's top-level shape is not guaranteed: depending on
//! the page it may be a `feeds` array of sections, an `items` array, a
//! `content` array, or a bare array. Classification is an explicit tagged
//! union matched exhaustively, so the fallback order is fixed and testable.

use serde_json::Value;

use crate::models::{Category, MediaItem, RawFeed};

// =============================================================================
// Shape Classification
// =============================================================================

/// Recognized top-level shapes of a collection response
///
/// Resolution order is the declaration order: `feeds` wins over `items`,
/// `items` over `content`, `content` over a bare array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedShape<'a> {
    /// `{ "feeds": [ { section_title, content: [...] }, ... ] }`
    Sections(&'a [Value]),
    /// `{ "items": [...] }`
    Items(&'a [Value]),
    /// `{ "content": [...] }`
    Content(&'a [Value]),
    /// A bare top-level array
    Bare(&'a [Value]),
    /// None of the above — "no data", not an error
    Unrecognized,
}

impl<'a> FeedShape<'a> {
    /// Classify a raw response value, first match wins
    pub fn classify(raw: &'a Value) -> Self {
        if let Some(feeds) = raw.get("feeds").and_then(Value::as_array) {
            return FeedShape::Sections(feeds.as_slice());
        }
        if let Some(items) = raw.get("items").and_then(Value::as_array) {
            return FeedShape::Items(items.as_slice());
        }
        if let Some(content) = raw.get("content").and_then(Value::as_array) {
            return FeedShape::Content(content.as_slice());
        }
        if let Some(array) = raw.as_array() {
            return FeedShape::Bare(array.as_slice());
        }
        FeedShape::Unrecognized
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize a collection response into ordered categories
///
/// Sections with empty or missing content are dropped; the single-list
/// shapes produce one synthetic category, or none at all when the list is
/// empty. An unrecognized shape yields an empty sequence.
pub fn categories(raw: &Value) -> Vec<Category> {
    match FeedShape::classify(raw) {
        FeedShape::Sections(sections) => {
            sections.iter().filter_map(section_to_category).collect()
        }
        FeedShape::Items(values) | FeedShape::Content(values) | FeedShape::Bare(values) => {
            let items = items_of(values);
            if items.is_empty() {
                Vec::new()
            } else {
                vec![Category { title: None, items }]
            }
        }
        FeedShape::Unrecognized => Vec::new(),
    }
}

/// Normalize a collection response into one flat item list
///
/// Same shape detection as [`categories`], but only ever extracts a single
/// sequence: the first feed's content, or the items/content/bare array.
pub fn flat_items(raw: &Value) -> Vec<MediaItem> {
    match FeedShape::classify(raw) {
        FeedShape::Sections(sections) => sections
            .first()
            .and_then(|section| section.get("content"))
            .and_then(Value::as_array)
            .map(|values| items_of(values))
            .unwrap_or_default(),
        FeedShape::Items(values) | FeedShape::Content(values) | FeedShape::Bare(values) => {
            items_of(values)
        }
        FeedShape::Unrecognized => Vec::new(),
    }
}

/// Extract the single item from a detail response
///
/// The detail endpoint usually returns the item object directly, but some
/// payloads nest it under one of the recognized list shapes; in that case
/// the first element wins. `None` means "not found", not an error.
pub fn detail_item(raw: &Value) -> Option<MediaItem> {
    match FeedShape::classify(raw) {
        FeedShape::Sections(sections) => sections
            .first()
            .and_then(|section| section.get("content"))
            .and_then(Value::as_array)
            .and_then(|values| items_of(values).into_iter().next()),
        FeedShape::Items(values) | FeedShape::Content(values) | FeedShape::Bare(values) => {
            items_of(values).into_iter().next()
        }
        FeedShape::Unrecognized => {
            if raw.is_object() {
                serde_json::from_value(raw.clone()).ok()
            } else {
                None
            }
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Decode items one by one, skipping entries that are not objects
fn items_of(values: &[Value]) -> Vec<MediaItem> {
    values
        .iter()
        .filter_map(|value| serde_json::from_value(value.clone()).ok())
        .collect()
}

fn section_to_category(value: &Value) -> Option<Category> {
    let section: RawFeed = serde_json::from_value(value.clone()).ok()?;
    let items = items_of(section.content.as_deref().unwrap_or(&[]));
    if items.is_empty() {
        return None;
    }
    Some(Category {
        title: section.section_title.or(section.title),
        items,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
