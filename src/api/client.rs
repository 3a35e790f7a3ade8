//! TV 2 Play content API client
//!
//! Two read-only endpoints (the collection feed and per-title detail), a
//! best-effort variant, and the pure poster URL transform. Responses are
//! returned as raw JSON values because the top-level shape varies; the
//! `feed` module owns making sense of them.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Default production base URL; overridable via config or `FILMTUI_BASE_URL`
pub const DEFAULT_BASE_URL: &str = "https://play.tv2.no";

/// The fixed first-page collection feed
pub const COLLECTION_PATH: &str = "/api/v4/feeds/page_01jwxh2p1me02sbhyxmht24cbp";

/// Detail endpoint prefix; the identifying path is appended as-is
pub const DETAIL_PATH_PREFIX: &str = "/api/v4/content/path/";

/// Poster dimensions for browse cards
pub const CARD_POSTER: (u32, u32) = (300, 450);

/// Poster dimensions for the detail view
pub const DETAIL_POSTER: (u32, u32) = (600, 900);

// =============================================================================
// Errors
// =============================================================================

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Http(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid image url: {0}")]
    InvalidUrl(String),
}

// =============================================================================
// Client
// =============================================================================

/// TV 2 Play content API client
#[derive(Debug, Clone)]
pub struct PlayClient {
    base_url: String,
    client: reqwest::Client,
}

impl PlayClient {
    /// Create a client against the production base URL
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing and config)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// GET a path under the base URL and parse the body as JSON
    ///
    /// No retries: a failure propagates to the owning view, which offers
    /// the retry affordance itself.
    async fn get_json(&self, path_and_query: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("JSON parse error: {}", e)))
    }

    /// Fetch the collection feed (first page)
    pub async fn fetch_collection(&self) -> Result<Value, ApiError> {
        self.get_json(COLLECTION_PATH).await
    }

    /// Fetch one title's detail by its identifying path
    ///
    /// The decoded path is interpolated directly, matching what the
    /// upstream service expects (`/api/v4/content/path//m/1` for `/m/1`).
    pub async fn fetch_item_detail(&self, path: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("{}{}", DETAIL_PATH_PREFIX, path)).await
    }

    /// Best-effort GET: degrades to `None` on any failure
    ///
    /// Only for callers where absence is tolerable; everything else goes
    /// through the propagating calls above.
    pub async fn safe_fetch(&self, path_and_query: &str) -> Option<Value> {
        self.get_json(path_and_query).await.ok()
    }
}

impl Default for PlayClient {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Poster URL Transform
// =============================================================================

/// Build a sized poster URL from an image-pack source URL
///
/// Sets `width`, `height` and `fit=crop` as query parameters, overwriting
/// any existing values while preserving everything else. An empty source
/// yields an empty string; a source that is not a parseable absolute URL is
/// an error, since malformed artwork references indicate an upstream data
/// problem worth surfacing.
pub fn build_poster_url(source: &str, width: u32, height: u32) -> Result<String, ApiError> {
    if source.is_empty() {
        return Ok(String::new());
    }

    let mut url = reqwest::Url::parse(source)
        .map_err(|_| ApiError::InvalidUrl(source.to_string()))?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "width" && key != "height" && key != "fit")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("width", &width.to_string());
        pairs.append_pair("height", &height.to_string());
        pairs.append_pair("fit", "crop");
    }

    Ok(url.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Poster URL Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_poster_url_appends_dimensions() {
        let url = build_poster_url("https://x/img.jpg", 300, 450).unwrap();
        assert!(url.starts_with("https://x/img.jpg?"));
        assert!(url.contains("width=300"));
        assert!(url.contains("height=450"));
        assert!(url.contains("fit=crop"));
    }

    #[test]
    fn test_poster_url_overwrites_existing_parameters() {
        let url =
            build_poster_url("https://x/img.jpg?width=100&fit=pad&v=7", 600, 900).unwrap();
        assert!(url.contains("width=600"));
        assert!(url.contains("height=900"));
        assert!(url.contains("fit=crop"));
        assert!(url.contains("v=7"));
        assert!(!url.contains("width=100"));
        assert!(!url.contains("fit=pad"));
    }

    #[test]
    fn test_poster_url_preserves_host_and_path() {
        let url = build_poster_url("https://img.example/packs/a/b.jpg", 300, 450).unwrap();
        let parsed = reqwest::Url::parse(&url).unwrap();
        assert_eq!(parsed.host_str(), Some("img.example"));
        assert_eq!(parsed.path(), "/packs/a/b.jpg");
    }

    #[test]
    fn test_poster_url_empty_source() {
        assert_eq!(build_poster_url("", 300, 450).unwrap(), "");
    }

    #[test]
    fn test_poster_url_rejects_malformed_source() {
        let result = build_poster_url("not a url", 300, 450);
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));

        // Relative references are not absolute URLs either
        let relative = build_poster_url("/img/poster.jpg", 300, 450);
        assert!(matches!(relative, Err(ApiError::InvalidUrl(_))));
    }

    // -------------------------------------------------------------------------
    // Client Construction Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = PlayClient::with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_safe_fetch_swallows_transport_errors() {
        tokio_test::block_on(async {
            // Nothing listens on the discard port; the error degrades to None
            let client = PlayClient::with_base_url("http://127.0.0.1:9");
            assert!(client.safe_fetch(COLLECTION_PATH).await.is_none());
        });
    }
}
