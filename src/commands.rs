//! CLI command handlers
//!
//! Implements the scriptable surface by calling the same client and
//! normalizer the TUI uses. Each handler takes its args and Output,
//! returns ExitCode.

use serde::Serialize;

use crate::api::{build_poster_url, ApiError, PlayClient};
use crate::cli::{resolve_path_arg, ExitCode, FeedCmd, InfoCmd, Output, PosterCmd};
use crate::config::Config;
use crate::feed;
use crate::models::{Category, MediaItem};

fn client_for(base_url: Option<&str>) -> PlayClient {
    match base_url {
        Some(url) => PlayClient::with_base_url(url),
        None => PlayClient::with_base_url(Config::load().effective_base_url()),
    }
}

fn exit_code_for(error: &ApiError) -> ExitCode {
    match error {
        ApiError::Network(_) | ApiError::Http(_) => ExitCode::NetworkError,
        ApiError::InvalidUrl(_) => ExitCode::InvalidArgs,
        ApiError::InvalidResponse(_) => ExitCode::Error,
    }
}

// =============================================================================
// Feed Command
// =============================================================================

#[derive(Serialize)]
struct CategoryOut {
    title: String,
    count: usize,
    items: Vec<MediaItem>,
}

impl CategoryOut {
    fn from_category(category: Category, limit: usize) -> Self {
        let title = category.display_title().to_string();
        let count = category.items.len();
        let mut items = category.items;
        if limit > 0 {
            items.truncate(limit);
        }
        Self { title, count, items }
    }
}

pub async fn feed_cmd(cmd: FeedCmd, base_url: Option<&str>, output: &Output) -> ExitCode {
    let client = client_for(base_url);

    output.info("Fetching film feed...");

    let raw = match client.fetch_collection().await {
        Ok(raw) => raw,
        Err(e) => return output.error(format!("Feed fetch failed: {}", e), exit_code_for(&e)),
    };

    if cmd.flat {
        let mut items = feed::flat_items(&raw);
        if items.is_empty() {
            return output.error("No films found", ExitCode::NoContent);
        }
        if cmd.limit > 0 {
            items.truncate(cmd.limit);
        }
        if let Err(e) = output.print(&items) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        let categories = feed::categories(&raw);
        if categories.is_empty() {
            return output.error("No films found", ExitCode::NoContent);
        }
        let out: Vec<CategoryOut> = categories
            .into_iter()
            .map(|c| CategoryOut::from_category(c, cmd.limit))
            .collect();
        if let Err(e) = output.print(&out) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    }
    ExitCode::Success
}

// =============================================================================
// Info Command
// =============================================================================

#[derive(Serialize)]
struct InfoOut {
    #[serde(flatten)]
    item: MediaItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    poster_url: Option<String>,
}

pub async fn info_cmd(cmd: InfoCmd, base_url: Option<&str>, output: &Output) -> ExitCode {
    let path = match resolve_path_arg(&cmd.path) {
        Ok(path) => path,
        Err(e) => return output.error(format!("Invalid path: {}", e), ExitCode::InvalidArgs),
    };

    let client = client_for(base_url);
    output.info(format!("Fetching detail for: {}", path));

    let raw = match client.fetch_item_detail(&path).await {
        Ok(raw) => raw,
        Err(e) => return output.error(format!("Detail fetch failed: {}", e), exit_code_for(&e)),
    };

    let Some(item) = feed::detail_item(&raw) else {
        return output.error("Film not found", ExitCode::NoContent);
    };

    let (width, height) = Config::load().poster_dimensions();
    let poster_url = match item.poster_source() {
        Some(source) => match build_poster_url(source, width, height) {
            Ok(url) if !url.is_empty() => Some(url),
            Ok(_) => None,
            // a malformed artwork reference is reported, not hidden
            Err(e) => {
                output.info(format!("Warning: {}", e));
                None
            }
        },
        None => None,
    };

    if let Err(e) = output.print(&InfoOut { item, poster_url }) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Poster Command
// =============================================================================

#[derive(Serialize)]
struct PosterOut {
    poster_url: String,
}

pub async fn poster_cmd(cmd: PosterCmd, output: &Output) -> ExitCode {
    match build_poster_url(&cmd.url, cmd.width, cmd.height) {
        Ok(url) if url.is_empty() => output.error("Empty image source", ExitCode::InvalidArgs),
        Ok(url) => {
            if output.json {
                if let Err(e) = output.print(&PosterOut { poster_url: url }) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else {
                output.line(&url);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("{}", e), ExitCode::InvalidArgs),
    }
}
