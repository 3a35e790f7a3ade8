//! Detail view
//!
//! Poster panel plus metadata for one title, with the same loading /
//! error / not-found treatment as the browse view.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::api::client::{build_poster_url, DETAIL_POSTER};
use crate::app::{App, ViewState};
use crate::models::MediaItem;
use crate::ui::Theme;

const POSTER_PANEL_WIDTH: u16 = 34;

// =============================================================================
// Entry Point
// =============================================================================

/// Render the detail view for the current state
pub fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let title = match &app.detail.state {
        ViewState::Ready(Some(item)) => format!(" {} ", item.display_title()),
        _ => " FILM ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(title, Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &app.detail.state {
        ViewState::Idle | ViewState::Loading => render_skeleton(frame, inner),
        ViewState::Failed(message) => render_error(frame, inner, message),
        ViewState::Ready(None) => render_not_found(frame, inner),
        ViewState::Ready(Some(item)) => render_item(frame, inner, item),
    }
}

// =============================================================================
// Success State
// =============================================================================

fn render_item(frame: &mut Frame, area: Rect, item: &MediaItem) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(POSTER_PANEL_WIDTH), Constraint::Min(1)])
        .split(area);

    render_poster_panel(frame, chunks[0], item);
    render_info_panel(frame, chunks[1], item);
}

fn render_poster_panel(frame: &mut Frame, area: Rect, item: &MediaItem) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" POSTER ", Theme::section_title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (width, height) = DETAIL_POSTER;
    let lines = match item.poster_source() {
        Some(source) => match build_poster_url(source, width, height) {
            Ok(url) if !url.is_empty() => vec![
                Line::from(""),
                Line::from(Span::styled("▶", Theme::title())),
                Line::from(""),
                Line::from(Span::styled(url, Theme::dimmed())),
            ],
            _ => vec![
                Line::from(""),
                Line::from(Span::styled("Invalid image reference", Theme::error())),
            ],
        },
        None => vec![
            Line::from(""),
            Line::from(Span::styled("No image available", Theme::dimmed())),
        ],
    };

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, inner);
}

fn render_info_panel(frame: &mut Frame, area: Rect, item: &MediaItem) {
    let mut lines = vec![
        Line::from(Span::styled(
            item.display_title().to_string(),
            Theme::title(),
        )),
        Line::from(""),
    ];

    if let Some(description) = &item.description {
        lines.push(Line::from(Span::styled(description.clone(), Theme::text())));
        lines.push(Line::from(""));
    }

    if let Some(duration) = &item.duration {
        lines.push(meta_line("Duration", duration));
    }
    if let Some(genre) = &item.genre {
        lines.push(meta_line("Genre", genre));
    }
    if let Some(year) = &item.year {
        lines.push(meta_line("Year", &year.to_string()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" esc ", Theme::keybind()),
        Span::styled(" back to films  ", Theme::dimmed()),
        Span::styled(" r ", Theme::keybind()),
        Span::styled(" reload", Theme::dimmed()),
    ]));

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn meta_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Theme::meta_label()),
        Span::styled(value.to_string(), Theme::text()),
    ])
}

// =============================================================================
// Non-Success States
// =============================================================================

fn render_skeleton(frame: &mut Frame, area: Rect) {
    let caption = Paragraph::new(Span::styled("Loading film details...", Theme::loading()));
    frame.render_widget(caption, Rect::new(area.x, area.y, area.width, 1));

    if area.height <= 2 {
        return;
    }
    let body = Rect::new(area.x, area.y + 2, area.width, area.height - 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(POSTER_PANEL_WIDTH), Constraint::Min(1)])
        .split(body);

    frame.render_widget(Block::default().style(Theme::skeleton()), chunks[0]);
    for row in 0..3u16 {
        let y = chunks[1].y + row * 2;
        if y >= chunks[1].y + chunks[1].height {
            break;
        }
        let width = chunks[1].width.saturating_sub(4 * (row + 1)).max(8);
        frame.render_widget(
            Block::default().style(Theme::skeleton()),
            Rect::new(chunks[1].x + 2, y, width, 1),
        );
    }
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Something went wrong", Theme::error())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" r ", Theme::keybind()),
            Span::styled(" try again  ", Theme::dimmed()),
            Span::styled(" esc ", Theme::keybind()),
            Span::styled(" back to films", Theme::dimmed()),
        ]),
    ];
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

/// The title exists as a route but the API had nothing for it
fn render_not_found(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Film not found", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "We couldn't find the film you're looking for.",
            Theme::dimmed(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" esc ", Theme::keybind()),
            Span::styled(" back to films", Theme::dimmed()),
        ]),
    ];
    let panel = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(panel, area);
}
