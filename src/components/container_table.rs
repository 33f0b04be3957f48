use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use crate::state::{ContainerSet, TableContent};
use crate::ui::{border_style, indicator_color, indicator_icon, selected_style, title_style, Theme};

/// Container table (one row per record, or a single placeholder/error row)
pub struct ContainerTable {
    pub state: TableState,
}

impl ContainerTable {
    pub fn new() -> Self {
        let mut state = TableState::default();
        state.select(Some(0));
        Self { state }
    }

    /// Move selection up, wrapping
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i.min(len - 1)));
    }

    /// Move selection down, wrapping
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn top(&mut self, len: usize) {
        if len > 0 {
            self.state.select(Some(0));
        }
    }

    pub fn bottom(&mut self, len: usize) {
        if len > 0 {
            self.state.select(Some(len - 1));
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// After a full re-render: keep the same container if it is still
    /// present, otherwise clamp to the new length
    pub fn reselect(&mut self, position: Option<usize>, len: usize) {
        let next = match (position, self.state.selected()) {
            _ if len == 0 => None,
            (Some(p), _) => Some(p),
            (None, Some(i)) => Some(i.min(len - 1)),
            (None, None) => Some(0),
        };
        self.state.select(next);
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        containers: &ContainerSet,
        actions_enabled: bool,
        focused: bool,
    ) {
        let widths = [
            Constraint::Length(14), // status
            Constraint::Fill(2),    // name
            Constraint::Fill(2),    // image
            Constraint::Fill(2),    // ports
            Constraint::Length(7),  // cpu
            Constraint::Length(10), // mem
            Constraint::Length(if actions_enabled { 26 } else { 6 }),
        ];

        let header = Row::new(["STATUS", "NAME", "IMAGE", "PORTS", "CPU", "MEM", "ACTIONS"])
            .style(Style::default().fg(Theme::FG_DARK).add_modifier(Modifier::BOLD));

        let block = |title: String| {
            Block::default()
                .title(title)
                .title_style(title_style(focused))
                .borders(Borders::ALL)
                .border_style(border_style(focused))
        };

        let (title, message, color) = match containers.content() {
            TableContent::Rows(_) => (String::new(), "", Theme::FG),
            TableContent::Loading => (
                " Containers ".to_string(),
                "Loading containers...",
                Theme::OVERLAY,
            ),
            TableContent::Empty => (
                " Containers (0) ".to_string(),
                "No containers found.",
                Theme::OVERLAY,
            ),
            TableContent::Error(message) => {
                (" Containers ".to_string(), message.as_str(), Theme::RED)
            }
        };
        if !message.is_empty() {
            render_message(frame, area, block(title), message, color);
            return;
        }
        let records = containers.records();

        let rows: Vec<Row> = records
            .iter()
            .map(|c| {
                let indicator = c.indicator();
                let color = indicator_color(indicator);
                let name_style = if c.parsed_status().is_running() {
                    Style::default().fg(Theme::CYAN).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Theme::FG_DARK)
                };
                let actions = match containers.busy_action(&c.id) {
                    Some(_) => "...".to_string(),
                    None if actions_enabled => "Logs  Start  Stop  Restart".to_string(),
                    None => "Logs".to_string(),
                };
                Row::new(vec![
                    Cell::from(Line::from(vec![
                        Span::styled(
                            format!("{} ", indicator_icon(indicator)),
                            Style::default().fg(color),
                        ),
                        Span::raw(truncate(&c.status, 12)),
                    ])),
                    Cell::from(c.display_name().to_string()).style(name_style),
                    Cell::from(c.image.clone()).style(Style::default().fg(Theme::FG_DARK)),
                    Cell::from(c.ports_display()).style(Style::default().fg(Theme::YELLOW)),
                    Cell::from(c.cpu_display()),
                    Cell::from(c.mem_display()),
                    Cell::from(actions).style(Style::default().fg(Theme::BLUE)),
                ])
            })
            .collect();
        let title = format!(" Containers ({}) ", records.len());

        let table = Table::new(rows, widths)
            .header(header)
            .block(block(title))
            .row_highlight_style(selected_style())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

/// Placeholder or error: one full-width line instead of the rows
fn render_message(frame: &mut Frame, area: Rect, block: Block, message: &str, color: Color) {
    let paragraph = Paragraph::new(Line::styled(message.to_string(), Style::default().fg(color)))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Truncate to `max_len` characters with an ellipsis
fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

impl Default for ContainerTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut table = ContainerTable::new();
        table.previous(3);
        assert_eq!(table.selected(), Some(2));
        table.next(3);
        assert_eq!(table.selected(), Some(0));
        table.bottom(3);
        assert_eq!(table.selected(), Some(2));
    }

    #[test]
    fn test_reselect() {
        let mut table = ContainerTable::new();
        table.bottom(5);
        table.reselect(None, 2);
        assert_eq!(table.selected(), Some(1));
        table.reselect(Some(0), 2);
        assert_eq!(table.selected(), Some(0));
        table.reselect(None, 0);
        assert_eq!(table.selected(), None);
        table.reselect(None, 3);
        assert_eq!(table.selected(), Some(0));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("restarting", 12), "restarting");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }
}
