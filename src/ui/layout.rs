use ratatui::prelude::*;

/// Header, body (container table), footer
pub fn main_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Split header into title and service info
pub fn header_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Percentage(70)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Centered modal with a fixed height in rows
pub fn centered_modal(area: Rect, width_percent: u16, height: u16) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    center_horizontally(vertical[1], width_percent)
}

/// Centered modal sized as a share of the screen in both directions
pub fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let height_percent = height_percent.min(100);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100 - height_percent) / 2),
        ])
        .split(area);

    center_horizontally(vertical[1], width_percent)
}

fn center_horizontally(area: Rect, width_percent: u16) -> Rect {
    let width_percent = width_percent.min(100);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(area);

    horizontal[1]
}
