//! Country multiselect dialog
//!
//! Lists the entity universe with selection markers. Space toggles the
//! highlighted country, 'a' selects everything, 'x' clears, and '/'
//! narrows the visible list. The narrowing is a display filter only - it
//! never changes which countries are selected.

use crate::action::Action;
use crate::component::Component;
use crate::model::SelectionState;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Country multiselect dialog
pub struct EntityFilterDialog {
    /// The full entity universe, sorted (set when the dialog opens)
    universe: Vec<String>,
    /// Indices into `universe` matching the search query
    visible: Vec<usize>,
    /// Cursor position within `visible`
    cursor: usize,
    /// List state for rendering
    list_state: ListState,
    /// Narrowing query
    search_query: String,
    /// Whether typed characters go to the query
    search_mode: bool,
}

impl Default for EntityFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityFilterDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            universe: Vec::new(),
            visible: Vec::new(),
            cursor: 0,
            list_state,
            search_query: String::new(),
            search_mode: false,
        }
    }

    /// Load the universe when the dialog opens
    pub fn set_universe(&mut self, universe: &[String]) {
        self.universe = universe.to_vec();
        self.search_query.clear();
        self.search_mode = false;
        self.refresh_visible();
    }

    /// The country currently under the cursor
    pub fn highlighted_entity(&self) -> Option<&str> {
        let idx = self.visible.get(self.cursor)?;
        self.universe.get(*idx).map(|s| s.as_str())
    }

    /// Recompute the visible list after the query changes
    fn refresh_visible(&mut self) {
        let query = self.search_query.to_lowercase();
        self.visible = self
            .universe
            .iter()
            .enumerate()
            .filter(|(_, name)| query.is_empty() || name.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();
        self.cursor = 0;
        self.list_state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn select_next(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    fn select_prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.search_mode = false;
            }
            KeyCode::Backspace => {
                self.search_query.pop();
                self.refresh_visible();
            }
            KeyCode::Char(c) => {
                self.search_query.push(c);
                self.refresh_visible();
            }
            _ => {}
        }
        None
    }

    /// Render the dialog with the live selection for markers
    pub fn draw_with_selection(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        selection: &SelectionState,
    ) -> Result<()> {
        frame.render_widget(Clear, area);

        let popup_width = 54u16.min(area.width.saturating_sub(4));
        let popup_height = area.height.saturating_sub(4).max(12);

        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Country list
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        // Header: selection summary and the narrowing query
        let mut header_spans = vec![Span::styled(
            format!(
                "{} of {} selected",
                selection.selected_count(),
                self.universe.len()
            ),
            Style::default().fg(Color::Cyan),
        )];
        if self.search_mode || !self.search_query.is_empty() {
            header_spans.push(Span::styled(
                format!("   /{}", self.search_query),
                Style::default().fg(Color::Yellow),
            ));
            if self.search_mode {
                header_spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
            }
        }

        let header = Paragraph::new(Line::from(header_spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Select Countries ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, main_chunks[0]);

        if self.visible.is_empty() {
            let empty_message = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No countries match the search",
                    Style::default().fg(Color::Yellow),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(empty_message, main_chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .visible
                .iter()
                .map(|&idx| {
                    let name = &self.universe[idx];
                    let is_selected = selection.is_selected(name);
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            if is_selected { "● " } else { "○ " },
                            Style::default().fg(if is_selected {
                                Color::Green
                            } else {
                                Color::DarkGray
                            }),
                        ),
                        Span::styled(
                            name.clone(),
                            if is_selected {
                                Style::default().fg(Color::White)
                            } else {
                                Style::default().fg(Color::DarkGray)
                            },
                        ),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            frame.render_stateful_widget(list, main_chunks[1], &mut self.list_state);
        }

        // Help bar
        let help_text = if self.search_mode {
            vec![
                Span::styled(" Esc/Enter ", Style::default().fg(Color::Yellow)),
                Span::raw("Done typing"),
            ]
        } else {
            vec![
                Span::styled(" Space ", Style::default().fg(Color::Green)),
                Span::raw("Toggle  "),
                Span::styled(" a ", Style::default().fg(Color::Cyan)),
                Span::raw("All  "),
                Span::styled(" x ", Style::default().fg(Color::Cyan)),
                Span::raw("Clear  "),
                Span::styled(" / ", Style::default().fg(Color::Cyan)),
                Span::raw("Search  "),
                Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
                Span::raw("Close"),
            ]
        };

        let help = Paragraph::new(Line::from(help_text))
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[2]);

        Ok(())
    }
}

impl Component for EntityFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            return Ok(self.handle_search_key(key));
        }

        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Enter => Some(Action::CloseModal),
            KeyCode::Char(' ') => self
                .highlighted_entity()
                .map(|name| Action::ToggleEntity(name.to_string())),
            KeyCode::Char('a') => Some(Action::SelectAllEntities),
            KeyCode::Char('x') => Some(Action::ClearSelection),
            KeyCode::Char('/') => {
                self.search_mode = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Some(Action::ModalDown)
            }
            KeyCode::Char('g') => {
                self.cursor = 0;
                if !self.visible.is_empty() {
                    self.list_state.select(Some(0));
                }
                None
            }
            KeyCode::Char('G') => {
                if !self.visible.is_empty() {
                    self.cursor = self.visible.len() - 1;
                    self.list_state.select(Some(self.cursor));
                }
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the live selection - see draw_with_selection
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    fn universe() -> Vec<String> {
        vec![
            "France".to_string(),
            "Germany".to_string(),
            "United States".to_string(),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_space_toggles_highlighted_entity() {
        let mut dialog = EntityFilterDialog::new();
        dialog.set_universe(&universe());

        let action = dialog.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(action, Some(Action::ToggleEntity("France".to_string())));
    }

    #[test]
    fn test_navigation_moves_highlight() {
        let mut dialog = EntityFilterDialog::new();
        dialog.set_universe(&universe());

        dialog.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(dialog.highlighted_entity(), Some("Germany"));

        dialog.handle_key_event(key(KeyCode::Up)).unwrap();
        assert_eq!(dialog.highlighted_entity(), Some("France"));
    }

    #[test]
    fn test_bulk_actions() {
        let mut dialog = EntityFilterDialog::new();
        dialog.set_universe(&universe());

        let all = dialog.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(all, Some(Action::SelectAllEntities));

        let clear = dialog.handle_key_event(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(clear, Some(Action::ClearSelection));
    }

    #[test]
    fn test_search_narrows_visible_list_only() {
        let mut dialog = EntityFilterDialog::new();
        dialog.set_universe(&universe());

        dialog.handle_key_event(key(KeyCode::Char('/'))).unwrap();
        dialog.handle_key_event(key(KeyCode::Char('g'))).unwrap();
        dialog.handle_key_event(key(KeyCode::Char('e'))).unwrap();
        dialog.handle_key_event(key(KeyCode::Char('r'))).unwrap();

        assert_eq!(dialog.visible.len(), 1);
        assert_eq!(dialog.highlighted_entity(), Some("Germany"));
        // The universe itself is untouched
        assert_eq!(dialog.universe.len(), 3);
    }

    #[test]
    fn test_toggle_only_offers_universe_members() {
        let mut dialog = EntityFilterDialog::new();
        dialog.set_universe(&universe());

        dialog.handle_key_event(key(KeyCode::Char('/'))).unwrap();
        dialog.handle_key_event(key(KeyCode::Char('z'))).unwrap();
        dialog.handle_key_event(key(KeyCode::Esc)).unwrap();

        // Nothing matches 'z', so Space has nothing to toggle
        let action = dialog.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(action, None);
    }

    #[test]
    fn test_escape_closes() {
        let mut dialog = EntityFilterDialog::new();
        dialog.set_universe(&universe());

        let action = dialog.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
    }
}
