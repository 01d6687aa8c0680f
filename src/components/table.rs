//! Table pane for the filtered rows
//!
//! Renders the current filtered view as a column-aligned table with the
//! inspection columns from the view binding. An empty view renders a
//! placeholder instead of failing.

use crate::action::Action;
use crate::component::Component;
use crate::model::binding::INSPECT_FIELDS;
use crate::model::Row;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Widest a single column may render
const MAX_COL_WIDTH: usize = 40;
/// Rows per page for PageUp/PageDown
const PAGE_SIZE: usize = 10;

/// Table pane displaying the filtered rows
pub struct TableComponent {
    /// Cell text per row, in inspection-column order
    rows: Vec<[String; INSPECT_FIELDS.len()]>,
    /// Scroll offset in data rows
    scroll: usize,
}

impl Default for TableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TableComponent {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            scroll: 0,
        }
    }

    /// Replace the displayed rows with a freshly filtered view
    pub fn set_rows(&mut self, view: &[&Row]) {
        self.rows = view
            .iter()
            .map(|row| {
                [
                    row.entity.clone(),
                    row.year.to_string(),
                    format!("{:.1}", row.pct_cals_from_carbs),
                    format!("{:.1}", row.overweight_or_obese),
                ]
            })
            .collect();
        self.scroll = self.scroll.min(self.rows.len().saturating_sub(1));
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Truncate a cell to a display width, appending an ellipsis
    fn truncate_cell(text: &str, width: usize) -> String {
        if text.width() <= width {
            return text.to_string();
        }
        let mut out = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width.saturating_sub(1) {
                break;
            }
            used += w;
            out.push(c);
        }
        out.push('…');
        out
    }

    /// Pad a cell to a display width (unicode-aware, left aligned)
    fn pad_cell(text: &str, width: usize) -> String {
        let padding = width.saturating_sub(text.width());
        format!("{}{}", text, " ".repeat(padding))
    }

    /// Build table lines from the current rows
    fn build_table_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if self.rows.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "No rows match the current filters",
                Style::default().fg(Color::Yellow),
            )));
            lines.push(Line::from(Span::styled(
                "Press f to choose countries, y to widen the year range",
                Style::default().fg(Color::DarkGray),
            )));
            return lines;
        }

        // Column widths from header and cell display widths
        let mut col_widths: Vec<usize> = INSPECT_FIELDS.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(cell.width());
            }
        }
        for width in &mut col_widths {
            *width = (*width).min(MAX_COL_WIDTH);
        }

        // Header
        let header_spans: Vec<Span> = INSPECT_FIELDS
            .iter()
            .enumerate()
            .flat_map(|(i, h)| {
                let cell = Self::truncate_cell(h, col_widths[i]);
                vec![
                    Span::styled(
                        Self::pad_cell(&cell, col_widths[i]),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" │ "),
                ]
            })
            .collect();
        lines.push(Line::from(header_spans));

        // Separator
        let separator: String = col_widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        // Rows
        for row in &self.rows {
            let row_spans: Vec<Span> = row
                .iter()
                .enumerate()
                .flat_map(|(i, cell)| {
                    let cell = Self::truncate_cell(cell, col_widths[i]);
                    vec![
                        Span::styled(
                            Self::pad_cell(&cell, col_widths[i]),
                            Style::default().fg(Color::White),
                        ),
                        Span::raw(" │ "),
                    ]
                })
                .collect();
            lines.push(Line::from(row_spans));
        }

        lines
    }
}

impl Component for TableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let max_scroll = self.rows.len().saturating_sub(1);
        match action {
            Action::ScrollDown => {
                if self.scroll < max_scroll {
                    self.scroll += 1;
                }
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            Action::PageDown => {
                self.scroll = (self.scroll + PAGE_SIZE).min(max_scroll);
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE_SIZE);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content = self.build_table_lines();
        let visible_height = area.height.saturating_sub(2) as usize;

        let title = format!(" Filtered Data ({} rows) ", self.rows.len());
        let paragraph = Paragraph::new(content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .scroll((self.scroll as u16, 0));

        frame.render_widget(paragraph, area);

        // Scrollbar if content exceeds the visible area
        let total = content.len();
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entity: &str, year: i32, carbs: f64, obese: f64) -> Row {
        Row {
            entity: entity.to_string(),
            year,
            pct_cals_from_carbs: carbs,
            overweight_or_obese: obese,
        }
    }

    #[test]
    fn test_set_rows_formats_cells() {
        let rows = [row("Côte d'Ivoire", 2005, 61.25, 22.5)];
        let mut table = TableComponent::new();
        table.set_rows(&rows.iter().collect::<Vec<_>>());

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0][0], "Côte d'Ivoire");
        assert_eq!(table.rows[0][1], "2005");
        assert_eq!(table.rows[0][2], "61.2");
        assert_eq!(table.rows[0][3], "22.5");
    }

    #[test]
    fn test_empty_view_renders_placeholder() {
        let table = TableComponent::new();
        let lines = table.build_table_lines();
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("No rows match"));
    }

    #[test]
    fn test_header_then_separator_then_rows() {
        let rows = [row("USA", 2000, 40.0, 30.0), row("FRA", 2001, 38.0, 20.0)];
        let mut table = TableComponent::new();
        table.set_rows(&rows.iter().collect::<Vec<_>>());

        let lines = table.build_table_lines();
        // header + separator + two data rows
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_truncate_cell_is_width_aware() {
        let truncated = TableComponent::truncate_cell("Saint Vincent and the Grenadines", 10);
        assert!(truncated.ends_with('…'));
        assert!(truncated.width() <= 10);
    }

    #[test]
    fn test_scroll_clamps_after_refilter() {
        let many: Vec<Row> = (0..20).map(|i| row("USA", 2000 + i, 40.0, 30.0)).collect();
        let mut table = TableComponent::new();
        table.set_rows(&many.iter().collect::<Vec<_>>());
        table.update(Action::PageDown).unwrap();
        assert_eq!(table.scroll, 10);

        // Refilter down to one row - scroll must not point past the end
        let one = [row("USA", 2000, 40.0, 30.0)];
        table.set_rows(&one.iter().collect::<Vec<_>>());
        assert_eq!(table.scroll, 0);
    }
}
