use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::config::LogMode;
use crate::state::{LogEntry, LogPhase, LogViewer};
use crate::ui::{centered_rect, Theme};

/// Log viewer drawn over the container table
pub struct LogModal;

impl LogModal {
    pub fn render(frame: &mut Frame, area: Rect, viewer: &mut LogViewer) {
        let modal_area = centered_rect(area, 90, 85);
        frame.render_widget(Clear, modal_area);

        let status = match (viewer.phase(), viewer.mode()) {
            (LogPhase::Streaming, _) if viewer.has_transport() => "live",
            (LogPhase::Streaming, _) => "ended",
            (LogPhase::Opening, LogMode::Stream) => "connecting",
            (LogPhase::Opening, LogMode::Snapshot) => "fetching",
            (LogPhase::Fetched, _) => "snapshot",
            (LogPhase::Closed, _) => "",
        };
        let block = Block::default()
            .title(format!(
                " Logs for {} [{}]{} ",
                viewer.container_name(),
                status,
                if viewer.follow { " [following]" } else { "" }
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::MODAL_BORDER))
            .style(Style::default().bg(Theme::MODAL_BG));

        let inner = block.inner(modal_area);
        let visible_height = inner.height as usize;
        viewer.update_scroll(visible_height);

        let lines: Vec<Line> = viewer
            .entries()
            .iter()
            .skip(viewer.scroll)
            .take(visible_height)
            .map(entry_line)
            .collect();

        // Content is plain text; nothing in it is interpreted
        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, modal_area);

        let total = viewer.entries().len();
        if total > visible_height {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));

            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(viewer.scroll);

            frame.render_stateful_widget(
                scrollbar,
                modal_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

fn entry_line(entry: &LogEntry) -> Line<'_> {
    match entry {
        LogEntry::Text(text) => {
            // Dim a leading RFC 3339 timestamp (docker --timestamps)
            if text.len() > 30
                && text.as_bytes().get(4) == Some(&b'-')
                && text.is_char_boundary(30)
            {
                let (timestamp, rest) = text.split_at(30);
                Line::from(vec![
                    Span::styled(timestamp, Style::default().fg(Theme::OVERLAY)),
                    Span::raw(rest),
                ])
            } else {
                Line::raw(text.as_str())
            }
        }
        LogEntry::Placeholder(text) => {
            Line::styled(text.as_str(), Style::default().fg(Theme::LOG_PENDING))
        }
        LogEntry::Error(text) => Line::styled(text.as_str(), Style::default().fg(Theme::LOG_ERROR)),
        LogEntry::Closed(text) => {
            Line::styled(text.as_str(), Style::default().fg(Theme::LOG_CLOSED))
        }
    }
}
