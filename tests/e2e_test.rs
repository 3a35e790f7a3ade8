//! End-to-end flow tests
//!
//! Drives the complete user journey against one mock server: feed fetch →
//! normalized categories → card selection → encoded route → detail fetch,
//! plus the failure/retry and stale-response flows.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockito::Server;
use serde_json::json;

use filmtui::api::client::{COLLECTION_PATH, DETAIL_PATH_PREFIX};
use filmtui::app::{App, Command};
use filmtui::{PlayClient, Route};

// =============================================================================
// Fixtures
// =============================================================================

fn feed_body() -> &'static str {
    r#"{
        "feeds": [
            {"section_title": "New", "content": [
                {"path": "/m/1", "title": "Movie 1", "duration": "1h 43m",
                 "image": {"src": "https://img.example/m1.jpg"}}
            ]}
        ]
    }"#
}

fn detail_body() -> &'static str {
    r#"{
        "path": "/m/1",
        "title": "Movie 1",
        "description": "A film about one movie.",
        "duration": "1h 43m",
        "genre": "Drama",
        "year": "2021"
    }"#
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

/// Run one command against the client, feeding the result back into the app
async fn run_command(app: &mut App, client: &PlayClient, command: Command) {
    match command {
        Command::LoadFeed => {
            let result = client.fetch_collection().await;
            app.feed_loaded(result);
        }
        Command::LoadDetail(ticket) => {
            let result = client.fetch_item_detail(&ticket.path).await;
            app.detail_loaded(ticket, result);
        }
    }
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn test_feed_to_detail_journey() {
    let mut server = Server::new_async().await;

    let feed_mock = server
        .mock("GET", COLLECTION_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feed_body())
        .create_async()
        .await;

    let detail_mock = server
        .mock("GET", format!("{}{}", DETAIL_PATH_PREFIX, "/m/1").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(detail_body())
        .create_async()
        .await;

    let client = PlayClient::with_base_url(server.url());
    let mut app = App::new();

    // mount: the browse view loads the feed
    let command = app.start().expect("initial feed load");
    run_command(&mut app, &client, command).await;
    feed_mock.assert_async().await;

    let data = app.browse.data().unwrap();
    assert_eq!(data.categories.len(), 1);
    assert_eq!(data.categories[0].display_title(), "New");
    assert_eq!(data.categories[0].items.len(), 1);
    assert_eq!(data.categories[0].items[0].display_title(), "Movie 1");

    // selecting the card routes to the encoded segment and fetches the detail
    let command = app.handle_key(key(KeyCode::Enter)).expect("detail load");
    assert_eq!(app.route, Route::Film("%2Fm%2F1".to_string()));
    assert_eq!(app.route.href(), "/movie/%2Fm%2F1");

    run_command(&mut app, &client, command).await;
    detail_mock.assert_async().await;

    let item = app.detail.state.value().unwrap().as_ref().unwrap();
    assert_eq!(item.display_title(), "Movie 1");
    assert_eq!(item.genre.as_deref(), Some("Drama"));
    assert_eq!(app.detail.path(), Some("/m/1"));
}

// =============================================================================
// Failure and Retry
// =============================================================================

#[tokio::test]
async fn test_feed_failure_then_retry_succeeds() {
    let mut server = Server::new_async().await;

    let failing = server
        .mock("GET", COLLECTION_PATH)
        .with_status(500)
        .create_async()
        .await;

    let client = PlayClient::with_base_url(server.url());
    let mut app = App::new();

    let command = app.start().unwrap();
    run_command(&mut app, &client, command).await;
    failing.assert_async().await;
    assert!(app.browse.state.is_failed());

    // the server recovers; the retry key starts a fresh fetch
    failing.remove_async().await;
    let recovered = server
        .mock("GET", COLLECTION_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feed_body())
        .create_async()
        .await;

    let command = app.handle_key(key(KeyCode::Char('r'))).expect("retry");
    run_command(&mut app, &client, command).await;
    recovered.assert_async().await;

    assert_eq!(app.browse.data().unwrap().categories.len(), 1);
}

// =============================================================================
// Stale Responses
// =============================================================================

#[tokio::test]
async fn test_path_change_discards_in_flight_response() {
    let mut server = Server::new_async().await;

    let feed_mock = server
        .mock("GET", COLLECTION_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"items": [
                {"path": "/m/a", "title": "Alpha"},
                {"path": "/m/b", "title": "Beta"}
            ]}"#,
        )
        .expect_at_least(1)
        .create_async()
        .await;

    let mock_a = server
        .mock("GET", format!("{}{}", DETAIL_PATH_PREFIX, "/m/a").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"path": "/m/a", "title": "Alpha"}"#)
        .create_async()
        .await;

    let mock_b = server
        .mock("GET", format!("{}{}", DETAIL_PATH_PREFIX, "/m/b").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"path": "/m/b", "title": "Beta"}"#)
        .create_async()
        .await;

    let client = PlayClient::with_base_url(server.url());
    let mut app = App::new();

    let command = app.start().unwrap();
    run_command(&mut app, &client, command).await;

    // open Alpha, but keep its fetch "in flight" by not applying it yet
    let Some(Command::LoadDetail(ticket_a)) = app.handle_key(key(KeyCode::Enter)) else {
        panic!("expected LoadDetail for Alpha");
    };
    let result_a = client.fetch_item_detail(&ticket_a.path).await;

    // user backs out and opens Beta before Alpha's response lands
    let command = app.handle_key(key(KeyCode::Esc)).expect("feed refetch");
    run_command(&mut app, &client, command).await;
    app.browse.move_right();
    let Some(Command::LoadDetail(ticket_b)) = app.handle_key(key(KeyCode::Enter)) else {
        panic!("expected LoadDetail for Beta");
    };

    // Alpha's response arrives late and is discarded
    app.detail_loaded(ticket_a, result_a);
    assert!(app.detail.state.is_loading());
    assert_eq!(app.detail.path(), Some("/m/b"));

    let result_b = client.fetch_item_detail(&ticket_b.path).await;
    app.detail_loaded(ticket_b, result_b);

    let item = app.detail.state.value().unwrap().as_ref().unwrap();
    assert_eq!(item.display_title(), "Beta");

    feed_mock.assert_async().await;
    mock_a.assert_async().await;
    mock_b.assert_async().await;
}
