//! Route segments and path encoding
//!
//! An item's identifying path (e.g. `/filmer/kon-tiki`) contains characters
//! that cannot live inside a single route segment, so it travels between the
//! browse and detail views percent-encoded. Decoding is strict: a malformed
//! segment is a load failure for the detail view, never passed through.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Failure to decode a route segment back into an identifying path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed percent escape at byte {0}")]
    InvalidEscape(usize),

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

// =============================================================================
// Codec
// =============================================================================

/// Percent-encode an identifying path for use as one route segment
///
/// Reserved characters (including `/`, `?`, `#`) and anything non-ASCII are
/// escaped, so the segment round-trips through any router unambiguously.
pub fn encode_path(path: &str) -> String {
    urlencoding::encode(path).into_owned()
}

/// Strictly decode a route segment back into an identifying path
///
/// Every `%` must begin a complete two-digit hex escape and the decoded
/// bytes must form valid UTF-8. The ecosystem decoders pass malformed
/// escapes through untouched, which would silently feed a garbled path to
/// the detail endpoint; here they fail instead.
pub fn decode_path(segment: &str) -> Result<String, DecodeError> {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                }
                _ => return Err(DecodeError::InvalidEscape(i)),
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| DecodeError::InvalidUtf8)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

// =============================================================================
// Route Surface
// =============================================================================

/// The two routes the application exposes
///
/// `Film` carries the already-encoded segment, exactly as it appears in an
/// href like `/movie/%2Fm%2F1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` — the browse view
    Home,
    /// `/movie/{segment}` — the detail view for one title
    Film(String),
}

impl Route {
    /// Build the detail route for an identifying path, encoding it
    pub fn film(path: &str) -> Route {
        Route::Film(encode_path(path))
    }

    /// Render as an href string
    pub fn href(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Film(segment) => format!("/movie/{}", segment),
        }
    }

    /// Parse an href string; `None` when it matches neither route
    pub fn parse(href: &str) -> Option<Route> {
        if href == "/" {
            return Some(Route::Home);
        }
        href.strip_prefix("/movie/")
            .filter(|segment| !segment.is_empty())
            .map(|segment| Route::Film(segment.to_string()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.href())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
