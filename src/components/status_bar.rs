use ratatui::{prelude::*, widgets::Paragraph};

use crate::commands::KeyBinding;
use crate::ui::{key_desc_span, key_span, Theme};

/// Status bar component (bottom of screen) - keybindings only
pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, keybindings: &[KeyBinding]) {
        let spans: Vec<Span> = keybindings
            .iter()
            .flat_map(|kb| [key_span(kb.key), key_desc_span(kb.desc)])
            .collect();

        let keys_widget = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Theme::BG_DARK))
            .alignment(Alignment::Center);
        frame.render_widget(keys_widget, area);
    }
}
