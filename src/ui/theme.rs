//! Cinema marquee theme for filmtui
//!
//! Warm amber on near-black, like a theater lobby after hours.
//! Color palette and style helpers for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Marquee color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #121017 (near-black violet)
    pub const BACKGROUND: Color = Color::Rgb(0x12, 0x10, 0x17);

    /// Primary: #ffb64c (marquee amber)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xb6, 0x4c);

    /// Secondary: #8fc7ff (projector blue)
    pub const SECONDARY: Color = Color::Rgb(0x8f, 0xc7, 0xff);

    /// Text: #e6e1d8 (warm white)
    pub const TEXT: Color = Color::Rgb(0xe6, 0xe1, 0xd8);

    /// Dim: #6e6878 (muted)
    pub const DIM: Color = Color::Rgb(0x6e, 0x68, 0x78);

    /// Success: #7dd88a (green)
    pub const SUCCESS: Color = Color::Rgb(0x7d, 0xd8, 0x8a);

    /// Warning: #ff9f40 (orange)
    pub const WARNING: Color = Color::Rgb(0xff, 0x9f, 0x40);

    /// Error: #ff6b6b (red)
    pub const ERROR: Color = Color::Rgb(0xff, 0x6b, 0x6b);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Slightly lighter background for panels/cards
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x1a, 0x17, 0x21);

    /// Block fill for loading skeletons
    pub const SKELETON: Color = Color::Rgb(0x24, 0x20, 0x2b);

    /// Border color (muted)
    pub const BORDER: Color = Color::Rgb(0x4a, 0x42, 0x55);

    /// Border color for the selected card (full amber)
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Section header style
    pub fn section_title() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Accent style (counts, captions)
    pub fn accent() -> Style {
        Style::default().fg(Self::WARNING)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Success style
    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Loading indicator style
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    /// Default border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Border of the selected card
    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    /// Skeleton placeholder fill
    pub fn skeleton() -> Style {
        Style::default().fg(Self::SKELETON).bg(Self::SKELETON)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::DIM)
            .add_modifier(Modifier::BOLD)
    }

    /// Card title of the selected card
    pub fn card_selected() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Metadata label ("Duration:", "Genre:", "Year:")
    pub fn meta_label() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Status bar background
    pub fn status_bar() -> Style {
        Style::default().fg(Self::DIM).bg(Self::BACKGROUND_LIGHT)
    }
}

// =============================================================================
// Contrast Helpers
// =============================================================================

/// Extract RGB components from an RGB color
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

fn channel_luminance(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn relative_luminance(rgb: (u8, u8, u8)) -> f64 {
    0.2126 * channel_luminance(rgb.0)
        + 0.7152 * channel_luminance(rgb.1)
        + 0.0722 * channel_luminance(rgb.2)
}

/// WCAG contrast ratio between two RGB colors (1.0 to 21.0)
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (Some(a), Some(b)) = (color_to_rgb(a), color_to_rgb(b)) else {
        return 1.0;
    };
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG AA for normal text (>= 4.5:1)
pub fn meets_wcag_aa(fg: Color, bg: Color) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// WCAG AA for large text (>= 3.0:1)
pub fn meets_wcag_aa_large(fg: Color, bg: Color) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}
