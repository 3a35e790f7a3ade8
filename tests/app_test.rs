//! View controller tests
//!
//! Exercises the browse and detail state machines through the public API:
//! fetch gating, normalization of every recognized response shape, route
//! encoding on selection, and the stale-response guard.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use std::sync::Arc;

use filmtui::app::{App, Command, ListLayout, ViewState};
use filmtui::logging::BufferLogger;
use filmtui::{ApiError, Route};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn press(app: &mut App, code: KeyCode) -> Option<Command> {
    app.handle_key(key(code))
}

// =============================================================================
// Browse: Response Shapes
// =============================================================================

#[test]
fn test_browse_accepts_feeds_shape() {
    let mut app = App::new();
    app.start();
    app.feed_loaded(Ok(json!({
        "feeds": [
            {"section_title": "New", "content": [{"path": "/m/1", "title": "Movie 1"}]},
            {"section_title": "Empty", "content": []}
        ]
    })));

    let data = app.browse.data().unwrap();
    assert_eq!(data.categories.len(), 1);
    assert_eq!(data.categories[0].display_title(), "New");
}

#[test]
fn test_browse_accepts_items_content_and_bare_shapes() {
    for raw in [
        json!({"items": [{"path": "/m/1", "title": "A"}]}),
        json!({"content": [{"path": "/m/1", "title": "A"}]}),
        json!([{"path": "/m/1", "title": "A"}]),
    ] {
        let mut app = App::new();
        app.start();
        app.feed_loaded(Ok(raw));

        let data = app.browse.data().unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].display_title(), "Movies");
        assert_eq!(data.grid.len(), 1);
    }
}

#[test]
fn test_browse_unrecognized_shape_is_empty_not_failed() {
    let mut app = App::new();
    app.start();
    app.feed_loaded(Ok(json!({"page": 1, "next": null})));

    assert!(app.browse.is_empty());
    assert!(!app.browse.state.is_failed());
}

// =============================================================================
// Browse: Fetch Gating
// =============================================================================

#[test]
fn test_refresh_refused_while_loading() {
    let mut app = App::new();
    assert_eq!(app.start(), Some(Command::LoadFeed));
    // feed is still in flight
    assert_eq!(press(&mut app, KeyCode::Char('r')), None);

    app.feed_loaded(Ok(json!({"items": []})));
    assert_eq!(press(&mut app, KeyCode::Char('r')), Some(Command::LoadFeed));
}

#[test]
fn test_failed_feed_offers_retry() {
    let mut app = App::new();
    app.start();
    app.feed_loaded(Err(ApiError::Http(502)));

    assert!(app.browse.state.is_failed());
    assert!(app.browse.state.error().unwrap().contains("502"));
    assert_eq!(press(&mut app, KeyCode::Char('r')), Some(Command::LoadFeed));
}

// =============================================================================
// Browse: Layout Toggle
// =============================================================================

#[test]
fn test_layout_toggle_switches_entry_points() {
    let mut app = App::new();
    app.start();
    app.feed_loaded(Ok(json!({
        "feeds": [
            {"section_title": "First", "content": [{"path": "/m/1", "title": "A"}]},
            {"section_title": "Second", "content": [{"path": "/m/2", "title": "B"}]}
        ]
    })));

    // sections layout sees both categories
    assert_eq!(app.browse.data().unwrap().categories.len(), 2);

    // grid layout sees only the first feed's content
    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.browse.layout, ListLayout::Grid);
    assert_eq!(app.browse.data().unwrap().grid.len(), 1);
    assert_eq!(
        app.browse.selected_item().unwrap().display_title(),
        "A"
    );
}

// =============================================================================
// Selection and Routing
// =============================================================================

#[test]
fn test_selection_encodes_route_segment() {
    let mut app = App::new();
    app.start();
    app.feed_loaded(Ok(json!({
        "items": [{"path": "/filmer/jakten på lykken", "title": "Jakten"}]
    })));

    let command = press(&mut app, KeyCode::Enter).unwrap();
    let Command::LoadDetail(ticket) = command else {
        panic!("expected LoadDetail");
    };

    // the route segment is fully escaped, the ticket carries the decoded path
    assert_eq!(ticket.path, "/filmer/jakten på lykken");
    let Route::Film(segment) = &app.route else {
        panic!("expected detail route");
    };
    assert!(!segment.contains('/'));
    assert!(!segment.contains(' '));
    assert_eq!(filmtui::decode_path(segment).unwrap(), ticket.path);
}

#[test]
fn test_selection_without_path_is_noop() {
    let mut app = App::new();
    app.start();
    app.feed_loaded(Ok(json!({"items": [{"title": "No Path"}]})));

    assert_eq!(press(&mut app, KeyCode::Enter), None);
    assert_eq!(app.route, Route::Home);
    assert_eq!(app.detail.state, ViewState::Idle);
}

// =============================================================================
// Detail: Stale Responses
// =============================================================================

#[test]
fn test_late_response_for_previous_path_never_lands() {
    let mut app = App::new();
    app.start();
    app.feed_loaded(Ok(json!({
        "items": [
            {"path": "/m/a", "title": "Alpha"},
            {"path": "/m/b", "title": "Beta"}
        ]
    })));

    let Some(Command::LoadDetail(ticket_a)) = press(&mut app, KeyCode::Enter) else {
        panic!("expected LoadDetail for A");
    };

    // back out, pick the second title while A is still in flight
    press(&mut app, KeyCode::Esc);
    app.feed_loaded(Ok(json!({
        "items": [
            {"path": "/m/a", "title": "Alpha"},
            {"path": "/m/b", "title": "Beta"}
        ]
    })));
    app.browse.move_right();
    let Some(Command::LoadDetail(ticket_b)) = press(&mut app, KeyCode::Enter) else {
        panic!("expected LoadDetail for B");
    };
    assert_eq!(ticket_b.path, "/m/b");

    // A resolves late; the detail view must still be waiting for B
    app.detail_loaded(ticket_a, Ok(json!({"path": "/m/a", "title": "Alpha"})));
    assert!(app.detail.state.is_loading());

    app.detail_loaded(ticket_b, Ok(json!({"path": "/m/b", "title": "Beta"})));
    let item = app.detail.state.value().unwrap().as_ref().unwrap();
    assert_eq!(item.display_title(), "Beta");
}

// =============================================================================
// Logging
// =============================================================================

#[test]
fn test_stale_discard_is_observable() {
    let logger = Arc::new(BufferLogger::new());
    let mut app = App::with_logger(logger.clone());
    app.start();
    app.feed_loaded(Ok(json!({
        "items": [
            {"path": "/m/a", "title": "Alpha"},
            {"path": "/m/b", "title": "Beta"}
        ]
    })));

    let Some(Command::LoadDetail(ticket_a)) = press(&mut app, KeyCode::Enter) else {
        panic!("expected LoadDetail");
    };
    press(&mut app, KeyCode::Esc);
    app.feed_loaded(Ok(json!({"items": [{"path": "/m/b", "title": "Beta"}]})));
    press(&mut app, KeyCode::Enter);

    app.detail_loaded(ticket_a, Ok(json!({"title": "Alpha"})));

    let entries = logger.entries();
    assert!(entries
        .iter()
        .any(|e| e.contains("discarded stale response for /m/a")));
}
