use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::state::Notice;
use crate::ui::{centered_modal, Theme};

/// Blocking notice; everything underneath ignores keys until it is dismissed
pub struct NoticeModal;

impl NoticeModal {
    pub fn render(frame: &mut Frame, area: Rect, notice: &Notice) {
        let modal_area = centered_modal(area, 50, 8);

        // Clear the background
        frame.render_widget(Clear, modal_area);

        let text = vec![
            Line::raw(""),
            Line::styled(notice.message.as_str(), Style::default().fg(Theme::FG)),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  Enter/Esc ", Style::default().fg(Theme::GREEN)),
                Span::raw("OK"),
            ]),
        ];

        let block = Block::default()
            .title(notice.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::RED))
            .style(Style::default().bg(Theme::MODAL_BG));

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, modal_area);
    }
}
