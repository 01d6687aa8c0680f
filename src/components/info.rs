//! Dataset information dialog component
//!
//! Displays the loaded dataset's shape: source path, row count, number of
//! countries, and the year span.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::Dataset;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::Path;

/// Dataset information dialog component
#[derive(Default)]
pub struct DatasetInfoDialog;

impl DatasetInfoDialog {
    fn info_line(label: &str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>12}: ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    }

    /// Render with the loaded dataset
    pub fn draw_with_dataset(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        dataset: &Dataset,
        data_path: &Path,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 56, 11);
        frame.render_widget(Clear, popup_area);

        let (min_year, max_year) = dataset.year_bounds();
        let content = vec![
            Line::from(""),
            Self::info_line("Source", data_path.display().to_string()),
            Self::info_line("Rows", dataset.len().to_string()),
            Self::info_line("Countries", dataset.entity_universe().len().to_string()),
            Self::info_line("Years", format!("{} – {}", min_year, max_year)),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " i/Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Close"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Dataset ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

impl Component for DatasetInfoDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('i') | KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the dataset - see draw_with_dataset
        Ok(())
    }
}
