//! Home component - Main dashboard screen
//!
//! Sidebar with the active filters, scatter chart over the filtered
//! table, status line and help bar. Owns the main-screen key bindings.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, ChartComponent, TableComponent};
use crate::model::SelectionState;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::path::Path;

/// Home component for the main dashboard view
#[derive(Default)]
pub struct HomeComponent;

impl HomeComponent {
    pub fn new() -> Self {
        Self
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Table scrolling
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

            // Filters
            KeyCode::Char('f') => Some(Action::OpenEntityFilter),
            KeyCode::Char('y') => Some(Action::OpenYearRange),
            KeyCode::Char('c') => Some(Action::CycleColorBy),
            KeyCode::Char('a') => Some(Action::SelectAllEntities),
            KeyCode::Char('x') => Some(Action::ClearSelection),

            // Modals
            KeyCode::Char('i') => Some(Action::OpenDatasetInfo),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub selection: &'a SelectionState,
    pub universe_size: usize,
    pub filtered_rows: usize,
    pub total_rows: usize,
    pub data_path: &'a Path,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    chart: &mut ChartComponent,
    table: &mut TableComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_sidebar(frame, layout.sidebar, ctx);
    chart.draw(frame, layout.chart)?;
    table.draw(frame, layout.table)?;
    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help);

    Ok(())
}

fn render_sidebar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let (lo, hi) = ctx.selection.year_range();

    let mut lines = vec![
        Line::from(Span::styled(
            "Countries",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("  {} / {}", ctx.selection.selected_count(), ctx.universe_size),
                Style::default().fg(Color::White),
            ),
            Span::styled(" selected", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Year Range",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {} – {}", lo, hi),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Color By",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    for choice in crate::model::ColorBy::all() {
        let active = choice == ctx.selection.color_by();
        lines.push(Line::from(vec![
            Span::styled(
                if active { "  ● " } else { "  ○ " },
                Style::default().fg(if active { Color::Green } else { Color::DarkGray }),
            ),
            Span::styled(
                choice.as_str(),
                if active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {}", ctx.filtered_rows),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(" of {} rows", ctx.total_rows),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filters ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![
        Span::styled(
            " Obesity Analysis ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            ctx.data_path.display().to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!("  {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let help_spans = vec![
        Span::styled(
            " q ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Quit "),
        Span::styled(
            " f ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Countries "),
        Span::styled(
            " y ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Years "),
        Span::styled(
            " c ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Color "),
        Span::styled(
            " a ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("All "),
        Span::styled(
            " x ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("Clear "),
        Span::styled(
            " j/k ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("Scroll "),
        Span::styled(
            " i ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Info "),
        Span::styled(
            " ? ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Help"),
    ];

    let paragraph = Paragraph::new(Line::from(help_spans))
        .block(Block::default().borders(Borders::TOP))
        .alignment(ratatui::layout::Alignment::Left);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_filter_keys_map_to_actions() {
        let mut home = HomeComponent::new();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('f'))).unwrap(),
            Some(Action::OpenEntityFilter)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('y'))).unwrap(),
            Some(Action::OpenYearRange)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('c'))).unwrap(),
            Some(Action::CycleColorBy)
        );
    }

    #[test]
    fn test_bulk_selection_keys() {
        let mut home = HomeComponent::new();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('a'))).unwrap(),
            Some(Action::SelectAllEntities)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('x'))).unwrap(),
            Some(Action::ClearSelection)
        );
    }

    #[test]
    fn test_quit_key_opens_confirmation() {
        let mut home = HomeComponent::new();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::OpenQuitDialog)
        );
    }
}
