use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::{centered_modal, Theme};

/// Help modal component
pub struct HelpModal;

impl HelpModal {
    pub fn render(frame: &mut Frame, area: Rect, actions_enabled: bool) {
        let mut shortcuts: Vec<(&str, &str)> = vec![
            ("j/↓", "Move down"),
            ("k/↑", "Move up"),
            ("g", "Go to top"),
            ("G", "Go to bottom"),
            ("Enter/l", "View logs"),
        ];
        if actions_enabled {
            shortcuts.extend([
                ("s", "Start container"),
                ("x", "Stop container"),
                ("R", "Restart container"),
            ]);
        }
        shortcuts.extend([
            ("r", "Refresh list"),
            ("f", "Follow log output (log view)"),
            ("Esc", "Close modal"),
            ("q", "Quit"),
        ]);

        let modal_area = centered_modal(area, 60, shortcuts.len() as u16 + 6);

        // Clear the background
        frame.render_widget(Clear, modal_area);

        let mut help_text = vec![
            Line::styled("Keyboard Shortcuts", Style::default().bold().fg(Theme::CYAN)),
            Line::raw(""),
        ];
        help_text.extend(shortcuts.into_iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:<9}", key), Style::default().fg(Theme::YELLOW)),
                Span::raw(desc),
            ])
        }));
        help_text.push(Line::raw(""));
        help_text.push(Line::styled("Press Esc to close", Style::default().fg(Theme::OVERLAY)));

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::MODAL_BORDER))
            .style(Style::default().bg(Theme::MODAL_BG));

        let paragraph = Paragraph::new(help_text).block(block);

        frame.render_widget(paragraph, modal_area);
    }
}
