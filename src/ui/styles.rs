use ratatui::prelude::*;

use crate::models::StatusIndicator;

/// Catppuccin Mocha palette
/// https://github.com/catppuccin/catppuccin
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(17, 17, 27);        // crust
    pub const BG_DARK: Color = Color::Rgb(12, 12, 20);   // modals
    pub const SURFACE0: Color = Color::Rgb(49, 50, 68);
    pub const FG: Color = Color::Rgb(205, 214, 244);
    pub const FG_DARK: Color = Color::Rgb(147, 153, 178);
    pub const OVERLAY: Color = Color::Rgb(127, 132, 156);

    pub const MAUVE: Color = Color::Rgb(203, 166, 247);
    pub const RED: Color = Color::Rgb(243, 139, 168);
    pub const PEACH: Color = Color::Rgb(250, 179, 135);
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);
    pub const GREEN: Color = Color::Rgb(166, 227, 161);
    pub const TEAL: Color = Color::Rgb(148, 226, 213);
    pub const BLUE: Color = Color::Rgb(137, 180, 250);
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254);

    pub const CYAN: Color = Self::TEAL;

    // UI elements
    pub const BORDER: Color = Self::SURFACE0;
    pub const BORDER_FOCUSED: Color = Self::MAUVE;
    pub const SELECTION_BG: Color = Self::SURFACE0;
    pub const SELECTION_FG: Color = Self::LAVENDER;

    // Status dots
    pub const STATUS_OK: Color = Self::GREEN;
    pub const STATUS_WARN: Color = Self::YELLOW;
    pub const STATUS_ALERT: Color = Self::RED;
    pub const STATUS_UNKNOWN: Color = Self::OVERLAY;

    // Modal
    pub const MODAL_BG: Color = Self::BG_DARK;
    pub const MODAL_BORDER: Color = Self::MAUVE;

    // Log notices
    pub const LOG_PENDING: Color = Self::OVERLAY;
    pub const LOG_ERROR: Color = Self::RED;
    pub const LOG_CLOSED: Color = Self::YELLOW;
}

/// Status dots for the table
pub struct StatusIcons;

impl StatusIcons {
    pub const OK: &'static str = "●";
    pub const WARN: &'static str = "◐";
    pub const ALERT: &'static str = "○";
    pub const UNKNOWN: &'static str = "◯";
}

pub fn indicator_icon(indicator: StatusIndicator) -> &'static str {
    match indicator {
        StatusIndicator::Ok => StatusIcons::OK,
        StatusIndicator::Warn => StatusIcons::WARN,
        StatusIndicator::Alert => StatusIcons::ALERT,
        StatusIndicator::Unknown => StatusIcons::UNKNOWN,
    }
}

pub fn indicator_color(indicator: StatusIndicator) -> Color {
    match indicator {
        StatusIndicator::Ok => Theme::STATUS_OK,
        StatusIndicator::Warn => Theme::STATUS_WARN,
        StatusIndicator::Alert => Theme::STATUS_ALERT,
        StatusIndicator::Unknown => Theme::STATUS_UNKNOWN,
    }
}

/// Create a style for selected items
pub fn selected_style() -> Style {
    Style::default()
        .bg(Theme::SELECTION_BG)
        .fg(Theme::SELECTION_FG)
        .add_modifier(Modifier::BOLD)
}

/// Create a style for borders
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Theme::BORDER_FOCUSED)
    } else {
        Style::default().fg(Theme::BORDER)
    }
}

/// Create a style for panel titles
pub fn title_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Theme::LAVENDER).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::OVERLAY)
    }
}

/// Highlighted key in the status bar
pub fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        format!(" {} ", key),
        Style::default()
            .bg(Theme::MAUVE)
            .fg(Theme::BG_DARK)
            .add_modifier(Modifier::BOLD),
    )
}

/// Key description with trailing gap
pub fn key_desc_span(desc: &str) -> Span<'_> {
    Span::styled(format!(" {}   ", desc), Style::default().fg(Theme::FG_DARK))
}
