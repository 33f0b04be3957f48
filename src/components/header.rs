use chrono::{DateTime, Local};
use ratatui::{prelude::*, widgets::Paragraph};

use crate::config::{ApiVersion, DashboardConfig, LogMode};
use crate::ui::Theme;

/// Header component with title and service info
pub struct Header;

impl Header {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        config: &DashboardConfig,
        last_updated: Option<DateTime<Local>>,
        loading: bool,
    ) {
        use crate::ui::layout::header_layout;

        let (title_area, info_area) = header_layout(area);

        let title = Paragraph::new(" Dockey ")
            .style(Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD));
        frame.render_widget(title, title_area);

        let api = match config.api_version {
            ApiVersion::V0 => "v0",
            ApiVersion::V1 => "v1",
        };
        let logs = match config.log_mode {
            LogMode::Stream => "stream",
            LogMode::Snapshot => "snapshot",
        };
        let updated = match last_updated {
            Some(at) => at.format("%H:%M:%S").to_string(),
            None => "never".to_string(),
        };
        let separator = || Span::styled(" │ ", Style::default().fg(Theme::BORDER));

        let mut spans = vec![
            Span::styled(config.base_url.as_str(), Style::default().fg(Theme::FG)),
            separator(),
            Span::styled("API ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(api, Style::default().fg(Theme::LAVENDER)),
            separator(),
            Span::styled("LOGS ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(logs, Style::default().fg(Theme::LAVENDER)),
            separator(),
            Span::styled("updated ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(updated, Style::default().fg(Theme::GREEN)),
        ];
        if loading {
            spans.push(Span::styled(" ⟳ ", Style::default().fg(Theme::PEACH)));
        } else {
            spans.push(Span::raw("   "));
        }

        let info = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
        frame.render_widget(info, info_area);
    }
}
