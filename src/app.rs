//! App state and view controllers
//!
//! Owns the two per-view state machines (browse and detail), the route the
//! app is currently on, and keyboard dispatch. Controllers never perform
//! I/O themselves: starting a fetch hands back a [`Command`] for the event
//! loop to run, and completed fetches come back through `apply`, carrying
//! the ticket captured at fetch start so stale responses can be discarded.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

use crate::api::ApiError;
use crate::feed;
use crate::logging::{Logger, NullLogger};
use crate::models::{Category, MediaItem};
use crate::route::{self, Route};

/// Fixed column count of the grid layout
pub const GRID_COLUMNS: usize = 4;

// =============================================================================
// View State
// =============================================================================

/// Per-view fetch state machine
///
/// `Idle -> Loading -> (Ready | Failed)`; `Ready` and `Failed` may re-enter
/// `Loading` on explicit retry. A new fetch is never started from `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

// =============================================================================
// Commands and Tickets
// =============================================================================

/// Work the event loop must run on behalf of a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the collection feed for the browse view
    LoadFeed,
    /// Fetch one title's detail
    LoadDetail(FetchTicket),
}

/// Captures the identifying path at fetch start
///
/// A result is applied only while the ticket's path still matches the
/// detail controller's current path; anything else arrived too late.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub path: String,
}

// =============================================================================
// Browse Controller
// =============================================================================

/// Both normalized forms of one feed snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedData {
    pub categories: Vec<Category>,
    pub grid: Vec<MediaItem>,
}

impl FeedData {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            categories: feed::categories(raw),
            grid: feed::flat_items(raw),
        }
    }
}

/// The two browse layouts, backed by the two normalization entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListLayout {
    /// Category sections with horizontal card strips
    #[default]
    Sections,
    /// One flat card grid
    Grid,
}

/// Cursor within the sections layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionCursor {
    pub row: usize,
    pub col: usize,
}

/// State machine and selection state for the browse view
#[derive(Debug, Default)]
pub struct BrowseController {
    pub state: ViewState<FeedData>,
    pub layout: ListLayout,
    pub cursor: SectionCursor,
    pub grid_index: usize,
}

impl BrowseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Loading` unless a fetch is already outstanding
    pub fn begin_load(&mut self) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.state = ViewState::Loading;
        true
    }

    /// Store a completed fetch; ignored unless a fetch is outstanding
    pub fn apply(&mut self, result: Result<Value, ApiError>) {
        if !self.state.is_loading() {
            return;
        }
        match result {
            Ok(raw) => {
                self.cursor = SectionCursor::default();
                self.grid_index = 0;
                self.state = ViewState::Ready(FeedData::from_raw(&raw));
            }
            Err(e) => {
                self.state = ViewState::Failed(format!("Failed to load films: {}", e));
            }
        }
    }

    pub fn toggle_layout(&mut self) {
        self.layout = match self.layout {
            ListLayout::Sections => ListLayout::Grid,
            ListLayout::Grid => ListLayout::Sections,
        };
    }

    /// Whether the view is in the (successful) nothing-to-show state
    pub fn is_empty(&self) -> bool {
        match (&self.state, self.layout) {
            (ViewState::Ready(data), ListLayout::Sections) => data.categories.is_empty(),
            (ViewState::Ready(data), ListLayout::Grid) => data.grid.is_empty(),
            _ => false,
        }
    }

    pub fn data(&self) -> Option<&FeedData> {
        self.state.value()
    }

    /// The item under the cursor, if any
    pub fn selected_item(&self) -> Option<&MediaItem> {
        let data = self.data()?;
        match self.layout {
            ListLayout::Sections => data
                .categories
                .get(self.cursor.row)?
                .items
                .get(self.cursor.col),
            ListLayout::Grid => data.grid.get(self.grid_index),
        }
    }

    // -------------------------------------------------------------------------
    // Cursor Movement
    // -------------------------------------------------------------------------

    fn section_rows(&self) -> usize {
        self.data().map(|d| d.categories.len()).unwrap_or(0)
    }

    fn section_len(&self, row: usize) -> usize {
        self.data()
            .and_then(|d| d.categories.get(row))
            .map(|c| c.items.len())
            .unwrap_or(0)
    }

    fn grid_len(&self) -> usize {
        self.data().map(|d| d.grid.len()).unwrap_or(0)
    }

    fn clamp_col(&mut self) {
        let len = self.section_len(self.cursor.row);
        if len > 0 && self.cursor.col >= len {
            self.cursor.col = len - 1;
        }
    }

    pub fn move_up(&mut self) {
        match self.layout {
            ListLayout::Sections => {
                if self.cursor.row > 0 {
                    self.cursor.row -= 1;
                    self.clamp_col();
                }
            }
            ListLayout::Grid => {
                if self.grid_index >= GRID_COLUMNS {
                    self.grid_index -= GRID_COLUMNS;
                }
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.layout {
            ListLayout::Sections => {
                if self.cursor.row + 1 < self.section_rows() {
                    self.cursor.row += 1;
                    self.clamp_col();
                }
            }
            ListLayout::Grid => {
                let len = self.grid_len();
                if self.grid_index + GRID_COLUMNS < len {
                    self.grid_index += GRID_COLUMNS;
                } else if len > 0 && self.grid_index / GRID_COLUMNS < (len - 1) / GRID_COLUMNS {
                    // last row is shorter; land on its final card
                    self.grid_index = len - 1;
                }
            }
        }
    }

    pub fn move_left(&mut self) {
        match self.layout {
            ListLayout::Sections => {
                if self.cursor.col > 0 {
                    self.cursor.col -= 1;
                }
            }
            ListLayout::Grid => {
                self.grid_index = self.grid_index.saturating_sub(1);
            }
        }
    }

    pub fn move_right(&mut self) {
        match self.layout {
            ListLayout::Sections => {
                let len = self.section_len(self.cursor.row);
                if len > 0 && self.cursor.col + 1 < len {
                    self.cursor.col += 1;
                }
            }
            ListLayout::Grid => {
                let len = self.grid_len();
                if len > 0 && self.grid_index + 1 < len {
                    self.grid_index += 1;
                }
            }
        }
    }
}

// =============================================================================
// Detail Controller
// =============================================================================

/// State machine for the detail view
///
/// `Ready(None)` is "not found" — a valid outcome, distinct from `Failed`.
#[derive(Debug, Default)]
pub struct DetailController {
    path: Option<String>,
    pub state: ViewState<Option<MediaItem>>,
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoded path this view currently belongs to
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Point the view at a route segment
    ///
    /// Decodes the segment first: a malformed one fails the view
    /// immediately and no fetch is attempted. Re-entering `Loading` while a
    /// fetch is outstanding is allowed only when the path actually changed.
    pub fn navigate(&mut self, segment: &str) -> Option<FetchTicket> {
        let decoded = match route::decode_path(segment) {
            Ok(path) => path,
            Err(e) => {
                self.path = None;
                self.state = ViewState::Failed(format!("Invalid film link: {}", e));
                return None;
            }
        };
        if self.state.is_loading() && self.path.as_deref() == Some(decoded.as_str()) {
            return None;
        }
        self.path = Some(decoded.clone());
        self.state = ViewState::Loading;
        Some(FetchTicket { path: decoded })
    }

    /// Re-fetch the current path after `Ready` or `Failed`
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.state.is_loading() {
            return None;
        }
        let path = self.path.clone()?;
        self.state = ViewState::Loading;
        Some(FetchTicket { path })
    }

    /// Store a completed fetch; returns whether it was applied
    ///
    /// A result whose ticket no longer matches the current path is stale
    /// and must never overwrite state for a different title.
    pub fn apply(&mut self, ticket: &FetchTicket, result: Result<Value, ApiError>) -> bool {
        if self.path.as_deref() != Some(ticket.path.as_str()) {
            return false;
        }
        if !self.state.is_loading() {
            return false;
        }
        self.state = match result {
            Ok(raw) => ViewState::Ready(feed::detail_item(&raw)),
            Err(e) => ViewState::Failed(format!("Failed to load film details: {}", e)),
        };
        true
    }
}

// =============================================================================
// Application
// =============================================================================

/// Top-level application state: current route plus both controllers
pub struct App {
    pub route: Route,
    pub browse: BrowseController,
    pub detail: DetailController,
    pub running: bool,
    logger: Arc<dyn Logger>,
}

impl App {
    pub fn new() -> Self {
        Self::with_logger(Arc::new(NullLogger))
    }

    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        Self {
            route: Route::Home,
            browse: BrowseController::new(),
            detail: DetailController::new(),
            running: true,
            logger,
        }
    }

    /// Kick off the initial feed fetch
    pub fn start(&mut self) -> Option<Command> {
        self.reload_feed()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    fn reload_feed(&mut self) -> Option<Command> {
        if self.browse.begin_load() {
            self.logger.info("feed fetch started");
            Some(Command::LoadFeed)
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // Fetch Results
    // -------------------------------------------------------------------------

    pub fn feed_loaded(&mut self, result: Result<Value, ApiError>) {
        if let Err(e) = &result {
            self.logger.warn(&format!("feed fetch failed: {}", e));
        }
        self.browse.apply(result);
        if let Some(data) = self.browse.data() {
            self.logger
                .info(&format!("feed loaded: {} categories", data.categories.len()));
        }
    }

    pub fn detail_loaded(&mut self, ticket: FetchTicket, result: Result<Value, ApiError>) {
        if let Err(e) = &result {
            self.logger
                .warn(&format!("detail fetch failed for {}: {}", ticket.path, e));
        }
        if !self.detail.apply(&ticket, result) {
            self.logger
                .warn(&format!("discarded stale response for {}", ticket.path));
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Open the detail view for the selected card
    ///
    /// Items without an identifying path are not navigable; selection is a
    /// no-op for them. The selection itself performs no fetch.
    fn open_selected(&mut self) -> Option<Command> {
        let item = self.browse.selected_item().filter(|i| i.is_navigable())?;
        let path = item.path.clone()?;
        let target = Route::film(&path);
        let segment = match &target {
            Route::Film(segment) => segment.clone(),
            Route::Home => return None,
        };
        self.logger.info(&format!("navigating to {}", target.href()));
        self.route = target;
        let ticket = self.detail.navigate(&segment)?;
        Some(Command::LoadDetail(ticket))
    }

    /// Return to the browse route; prior list state is not restored
    fn back_to_browse(&mut self) -> Option<Command> {
        self.route = Route::Home;
        self.reload_feed()
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle a keyboard event, returning any fetch to dispatch
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }
        if key.code == KeyCode::Char('q') {
            self.quit();
            return None;
        }

        match self.route {
            Route::Home => self.handle_browse_key(key),
            Route::Film(_) => self.handle_detail_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.browse.move_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.browse.move_down();
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.browse.move_left();
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.browse.move_right();
                None
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('g') => {
                self.browse.toggle_layout();
                None
            }
            KeyCode::Char('r') => self.reload_feed(),
            _ => None,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.back_to_browse(),
            KeyCode::Char('r') => {
                let ticket = self.detail.retry()?;
                self.logger.info(&format!("retrying {}", ticket.path));
                Some(Command::LoadDetail(ticket))
            }
            _ => None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
