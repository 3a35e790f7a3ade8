//! Browse view
//!
//! Renders the category sections with horizontal card strips, or the flat
//! card grid, plus the three non-success states: a loading skeleton, an
//! error panel with a retry hint, and a distinct empty panel. The three are
//! never conflated.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{App, ListLayout, SectionCursor, ViewState, GRID_COLUMNS};
use crate::models::{Category, MediaItem};
use crate::ui::Theme;

/// Card cell width in the sections layout
pub const CARD_WIDTH: u16 = 24;

/// Card cell height in both layouts
pub const CARD_HEIGHT: u16 = 6;

/// One section row: title line plus its card strip
const SECTION_HEIGHT: u16 = CARD_HEIGHT + 1;

// =============================================================================
// Entry Point
// =============================================================================

/// Render the browse view for the current state
pub fn render_browse(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" FILMS ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &app.browse.state {
        ViewState::Idle | ViewState::Loading => render_skeleton(frame, inner),
        ViewState::Failed(message) => render_error(frame, inner, message),
        ViewState::Ready(data) => {
            if app.browse.is_empty() {
                render_empty(frame, inner);
            } else {
                match app.browse.layout {
                    ListLayout::Sections => {
                        render_sections(frame, inner, &data.categories, app.browse.cursor)
                    }
                    ListLayout::Grid => {
                        render_grid(frame, inner, &data.grid, app.browse.grid_index)
                    }
                }
            }
        }
    }
}

// =============================================================================
// Sections Layout
// =============================================================================

fn render_sections(frame: &mut Frame, area: Rect, categories: &[Category], cursor: SectionCursor) {
    let visible_rows = (area.height / SECTION_HEIGHT).max(1) as usize;
    let first_row = if cursor.row >= visible_rows {
        cursor.row + 1 - visible_rows
    } else {
        0
    };

    for (slot, (row, category)) in categories
        .iter()
        .enumerate()
        .skip(first_row)
        .take(visible_rows)
        .enumerate()
    {
        let y = area.y + slot as u16 * SECTION_HEIGHT;
        if y + SECTION_HEIGHT > area.y + area.height {
            break;
        }

        let title_area = Rect::new(area.x, y, area.width, 1);
        let header = Line::from(vec![
            Span::styled(category.display_title().to_string(), Theme::section_title()),
            Span::raw("  "),
            Span::styled(category.count_caption(), Theme::accent()),
        ]);
        frame.render_widget(Paragraph::new(header), title_area);

        let strip_area = Rect::new(area.x, y + 1, area.width, CARD_HEIGHT);
        let selected_col = if row == cursor.row {
            Some(cursor.col)
        } else {
            None
        };
        render_card_strip(frame, strip_area, &category.items, selected_col);
    }
}

/// Render one horizontal strip of cards, windowed around the selection
fn render_card_strip(
    frame: &mut Frame,
    area: Rect,
    items: &[MediaItem],
    selected_col: Option<usize>,
) {
    let visible_cols = (area.width / CARD_WIDTH).max(1) as usize;
    let anchor = selected_col.unwrap_or(0);
    let first_col = if anchor >= visible_cols {
        anchor + 1 - visible_cols
    } else {
        0
    };

    for (slot, (col, item)) in items
        .iter()
        .enumerate()
        .skip(first_col)
        .take(visible_cols)
        .enumerate()
    {
        let x = area.x + slot as u16 * CARD_WIDTH;
        if x + CARD_WIDTH > area.x + area.width {
            break;
        }
        let card_area = Rect::new(x, area.y, CARD_WIDTH, area.height);
        render_card(frame, card_area, item, selected_col == Some(col));
    }
}

// =============================================================================
// Grid Layout
// =============================================================================

fn render_grid(frame: &mut Frame, area: Rect, items: &[MediaItem], selected: usize) {
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = selected / GRID_COLUMNS;
    let first_row = if selected_row >= visible_rows {
        selected_row + 1 - visible_rows
    } else {
        0
    };

    let card_width = (area.width / GRID_COLUMNS as u16).max(1);

    for slot in 0..visible_rows {
        let row = first_row + slot;
        let y = area.y + slot as u16 * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        for col in 0..GRID_COLUMNS {
            let index = row * GRID_COLUMNS + col;
            let Some(item) = items.get(index) else {
                break;
            };
            let x = area.x + col as u16 * card_width;
            let card_area = Rect::new(x, y, card_width, CARD_HEIGHT);
            render_card(frame, card_area, item, index == selected);
        }
    }
}

// =============================================================================
// Cards
// =============================================================================

fn render_card(frame: &mut Frame, area: Rect, item: &MediaItem, selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if selected {
            Theme::border_focused()
        } else {
            Theme::border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(Span::styled(
        item.display_title().to_string(),
        if selected {
            Theme::card_selected()
        } else {
            Theme::text()
        },
    ))];

    let mut meta: Vec<String> = Vec::new();
    if let Some(duration) = &item.duration {
        meta.push(duration.clone());
    }
    if let Some(year) = &item.year {
        meta.push(year.to_string());
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(meta.join(" · "), Theme::dimmed())));
    }

    if let Some(description) = item.card_description() {
        lines.push(Line::from(Span::styled(description, Theme::dimmed())));
    }

    let card = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(card, inner);
}

// =============================================================================
// Non-Success States
// =============================================================================

/// Skeleton placeholder shown while the feed loads
fn render_skeleton(frame: &mut Frame, area: Rect) {
    let caption = Paragraph::new(Span::styled("Loading films...", Theme::loading()));
    frame.render_widget(caption, Rect::new(area.x, area.y, area.width, 1));

    let visible_cols = (area.width / CARD_WIDTH).max(1).min(5);
    for section in 0..3u16 {
        let y = area.y + 1 + section * SECTION_HEIGHT;
        if y + SECTION_HEIGHT > area.y + area.height {
            break;
        }
        let title_width = area.width.min(18);
        frame.render_widget(
            Block::default().style(Theme::skeleton()),
            Rect::new(area.x, y, title_width, 1),
        );
        for col in 0..visible_cols {
            let x = area.x + col * CARD_WIDTH;
            if x + CARD_WIDTH > area.x + area.width {
                break;
            }
            frame.render_widget(
                Block::default().style(Theme::skeleton()),
                Rect::new(x, y + 1, CARD_WIDTH - 2, CARD_HEIGHT - 1),
            );
        }
    }
}

/// Error panel with the retry affordance
fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Something went wrong", Theme::error())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" r ", Theme::keybind()),
            Span::styled(" try again", Theme::dimmed()),
        ]),
    ];
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

/// Empty panel — a successful fetch with nothing to show
fn render_empty(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No films found", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "We couldn't find any films to display.",
            Theme::dimmed(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" r ", Theme::keybind()),
            Span::styled(" refresh", Theme::dimmed()),
        ]),
    ];
    let panel = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(panel, area);
}
