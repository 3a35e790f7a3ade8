//! filmtui - Terminal client for the TV 2 Play film catalogue
//!
//! Run without arguments for the interactive TUI; use subcommands for
//! scripting.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! filmtui
//!
//! # CLI mode (for automation)
//! filmtui feed --json
//! filmtui info /filmer/kon-tiki
//! filmtui poster "https://img.example/p.jpg" -W 600 -H 900
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use serde_json::Value;
use tokio::sync::mpsc;

use filmtui::api::{ApiError, PlayClient};
use filmtui::app::{App, Command, FetchTicket, ListLayout};
use filmtui::cli::{Cli, Command as CliCommand, ExitCode, Output};
use filmtui::commands;
use filmtui::config::Config;
use filmtui::route::Route;
use filmtui::ui::{browser, detail, Theme};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Completed fetches flowing back into the event loop
enum Msg {
    Feed(Result<Value, ApiError>),
    Detail(FetchTicket, Result<Value, ApiError>),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(cli).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let base_url = cli.base_url.clone();

    match cli.command {
        Some(CliCommand::Feed(cmd)) => {
            commands::feed_cmd(cmd, base_url.as_deref(), &output).await
        }
        Some(CliCommand::Info(cmd)) => {
            commands::info_cmd(cmd, base_url.as_deref(), &output).await
        }
        Some(CliCommand::Poster(cmd)) => commands::poster_cmd(cmd, &output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: Cli) -> Result<()> {
    let config = Config::load();
    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| config.effective_base_url());
    let client = PlayClient::with_base_url(base_url);

    let mut app = App::new();
    if config.start_in_grid() {
        app.browse.layout = ListLayout::Grid;
    }

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, client).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - drains fetch results, handles input, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: PlayClient) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel();

    if let Some(command) = app.start() {
        dispatch(command, &client, &tx);
    }

    while app.running {
        terminal.draw(|frame| render_ui(frame, app))?;

        // Apply completed fetches before waiting on input
        while let Ok(msg) = rx.try_recv() {
            match msg {
                Msg::Feed(result) => app.feed_loaded(result),
                Msg::Detail(ticket, result) => app.detail_loaded(ticket, result),
            }
        }

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = app.handle_key(key) {
                        dispatch(command, &client, &tx);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Spawn the fetch a controller asked for; its result lands on the channel
fn dispatch(command: Command, client: &PlayClient, tx: &mpsc::UnboundedSender<Msg>) {
    let client = client.clone();
    let tx = tx.clone();
    match command {
        Command::LoadFeed => {
            tokio::spawn(async move {
                let result = client.fetch_collection().await;
                let _ = tx.send(Msg::Feed(result));
            });
        }
        Command::LoadDetail(ticket) => {
            tokio::spawn(async move {
                let result = client.fetch_item_detail(&ticket.path).await;
                let _ = tx.send(Msg::Detail(ticket, result));
            });
        }
    }
}

// =============================================================================
// UI Rendering
// =============================================================================

/// Main render function - dispatches to view-specific renderers
fn render_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0]);
    match app.route {
        Route::Home => browser::render_browse(frame, chunks[1], app),
        Route::Film(_) => detail::render_detail(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);
}

/// Render the header with logo and tagline
fn render_header(frame: &mut Frame, area: Rect) {
    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "FILM",
            Style::default()
                .fg(Theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "TUI",
            Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("TV 2 Play films", Theme::dimmed()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, area);
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.route {
        Route::Home => {
            let layout_name = match app.browse.layout {
                ListLayout::Sections => " SECTIONS ",
                ListLayout::Grid => " GRID ",
            };
            Span::styled(
                layout_name,
                Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
            )
        }
        Route::Film(_) => Span::styled(
            " DETAIL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
        ),
    };

    let route_indicator = Span::styled(format!(" {} ", app.route.href()), Theme::dimmed());

    let help = match app.route {
        Route::Home => " q:quit  g:layout  r:refresh  ↵:open ",
        Route::Film(_) => " q:quit  r:reload  esc:back ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        route_indicator,
        Span::raw(" │ "),
        Span::styled(help, Theme::dimmed()),
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}
