//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub sidebar: Rect,
    pub chart: Rect,
    pub table: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout
///
/// Sidebar on the left with the filter summary, chart over table on the
/// right, status line and help bar along the bottom.
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(22), Constraint::Percentage(78)])
        .split(main_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(horizontal_chunks[1]);

    MainLayout {
        sidebar: horizontal_chunks[0],
        chart: right_chunks[0],
        table: right_chunks[1],
        status: main_chunks[1],
        help: main_chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 50, 10);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 15);
    }

    #[test]
    fn test_centered_popup_clamps_to_small_area() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered_popup(area, 50, 10);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }
}
