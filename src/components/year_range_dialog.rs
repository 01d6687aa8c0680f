//! Year range editor dialog
//!
//! Adjusts the closed [lo, hi] interval with the arrow keys. The dialog
//! clamps both endpoints to the dataset's bounds and never lets them
//! cross, so Enter always applies a valid range.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Which endpoint the arrow keys move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RangeField {
    #[default]
    Lo,
    Hi,
}

/// Year range editor dialog
#[derive(Default)]
pub struct YearRangeDialog {
    lo: i32,
    hi: i32,
    /// Dataset year bounds the endpoints are clamped to
    bounds: (i32, i32),
    field: RangeField,
}

impl YearRangeDialog {
    /// Load the current range and the dataset bounds when the dialog opens
    pub fn set_range(&mut self, lo: i32, hi: i32, bounds: (i32, i32)) {
        self.bounds = bounds;
        self.lo = lo.clamp(bounds.0, bounds.1);
        self.hi = hi.clamp(bounds.0, bounds.1);
        if self.lo > self.hi {
            self.hi = self.lo;
        }
        self.field = RangeField::Lo;
    }

    pub fn range(&self) -> (i32, i32) {
        (self.lo, self.hi)
    }

    fn adjust(&mut self, delta: i32) {
        match self.field {
            // lo moves within [bounds.0, hi]
            RangeField::Lo => self.lo = (self.lo + delta).clamp(self.bounds.0, self.hi),
            // hi moves within [lo, bounds.1]
            RangeField::Hi => self.hi = (self.hi + delta).clamp(self.lo, self.bounds.1),
        }
    }

    fn jump_to_bound(&mut self) {
        match self.field {
            RangeField::Lo => self.lo = self.bounds.0,
            RangeField::Hi => self.hi = self.bounds.1,
        }
    }

    fn field_line(&self, label: &str, value: i32, field: RangeField) -> Line<'static> {
        let active = self.field == field;
        let marker = if active { "▶ " } else { "  " };
        let value_style = if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(Color::Green)),
            Span::styled(format!("{:<10}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("◀ {} ▶", value), value_style),
        ])
    }
}

impl Component for YearRangeDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('y') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SetYearRange(self.lo, self.hi)),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Down | KeyCode::Char('j')
            | KeyCode::Tab => {
                self.field = match self.field {
                    RangeField::Lo => RangeField::Hi,
                    RangeField::Hi => RangeField::Lo,
                };
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.adjust(-1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.adjust(1);
                None
            }
            KeyCode::Char('H') => {
                self.adjust(-10);
                None
            }
            KeyCode::Char('L') => {
                self.adjust(10);
                None
            }
            KeyCode::Home | KeyCode::End => {
                self.jump_to_bound();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 44, 11);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            self.field_line("From", self.lo, RangeField::Lo),
            Line::from(""),
            self.field_line("To", self.hi, RangeField::Hi),
            Line::from(""),
            Line::from(Span::styled(
                format!("Dataset spans {} – {}", self.bounds.0, self.bounds.1),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" ←/→ ", Style::default().fg(Color::Cyan)),
                Span::raw("Adjust  "),
                Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
                Span::raw("Field  "),
                Span::styled(" Enter ", Style::default().fg(Color::Green)),
                Span::raw("Apply  "),
                Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Year Range ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_enter_applies_current_range() {
        let mut dialog = YearRangeDialog::default();
        dialog.set_range(1995, 2010, (1990, 2020));

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::SetYearRange(1995, 2010)));
    }

    #[test]
    fn test_endpoints_clamp_to_bounds() {
        let mut dialog = YearRangeDialog::default();
        dialog.set_range(1990, 2020, (1990, 2020));

        // lo cannot go below the dataset minimum
        dialog.handle_key_event(key(KeyCode::Left)).unwrap();
        assert_eq!(dialog.range(), (1990, 2020));

        // hi cannot go above the dataset maximum
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        dialog.handle_key_event(key(KeyCode::Right)).unwrap();
        assert_eq!(dialog.range(), (1990, 2020));
    }

    #[test]
    fn test_endpoints_cannot_cross() {
        let mut dialog = YearRangeDialog::default();
        dialog.set_range(2000, 2000, (1990, 2020));

        // lo is pinned at hi
        dialog.handle_key_event(key(KeyCode::Right)).unwrap();
        assert_eq!(dialog.range(), (2000, 2000));

        // and hi is pinned at lo when stepping down
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        dialog.handle_key_event(key(KeyCode::Left)).unwrap();
        assert_eq!(dialog.range(), (2000, 2000));
    }

    #[test]
    fn test_big_steps() {
        let mut dialog = YearRangeDialog::default();
        dialog.set_range(2010, 2020, (1990, 2020));

        dialog.handle_key_event(key(KeyCode::Char('H'))).unwrap();
        assert_eq!(dialog.range(), (2000, 2020));
    }

    #[test]
    fn test_set_range_sanitizes_inverted_input() {
        let mut dialog = YearRangeDialog::default();
        dialog.set_range(2015, 2005, (1990, 2020));

        let (lo, hi) = dialog.range();
        assert!(lo <= hi);
    }
}
