//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that delegates event handling and rendering to child
//! components. App owns the domain state and the selection state; every
//! selection mutation triggers a full re-filter of the view.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, ChartComponent, DatasetInfoDialog, EntityFilterDialog, HelpDialog,
    HomeComponent, HomeRenderContext, QuitDialog, SplashComponent, TableComponent,
    YearRangeDialog,
};
use crate::model::domain::DomainState;
use crate::model::filter;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::AppMode;
use crate::model::{ChartBinding, Dataset, LoadError, SelectionState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use std::path::{Path, PathBuf};

// ═══════════════════════════════════════════════════════════════════════════════
// Error Message Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Generate a user-friendly startup failure message
fn load_error_message(data_path: &Path, error: &LoadError) -> String {
    let mut msg = format!(
        "Could not load the dataset from:\n  {}\n\n{}\n\n",
        data_path.display(),
        error
    );

    match error {
        LoadError::Io(_) => {
            msg.push_str("Check that the file exists and is readable.\n");
            msg.push_str("Pass a path on the command line or set data_path\n");
            msg.push_str("in ~/.obesity-tui/config.json");
        }
        LoadError::MissingColumn(_) => {
            msg.push_str("The file must provide the columns:\n");
            msg.push_str("  entity, year, pct_cals_from_carbs, overweight_or_obese");
        }
        LoadError::Malformed(_) => {
            msg.push_str("The file could not be parsed as CSV.\n");
            msg.push_str("Check for truncated rows or non-numeric values.");
        }
        LoadError::Empty => {
            msg.push_str("The file has a valid header but no observations.");
        }
    }

    msg
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Next mode to transition to after splash
    pub next_mode_after_splash: AppMode,

    /// Domain state (the loaded dataset)
    pub domain: DomainState,

    /// The user-chosen filter parameters
    pub selection: SelectionState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Startup failure text (LoadFailed mode)
    pub load_error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub home: HomeComponent,
    pub chart: ChartComponent,
    pub table: TableComponent,
    pub quit_dialog: QuitDialog,
    pub entity_filter_dialog: EntityFilterDialog,
    pub year_range_dialog: YearRangeDialog,
    pub info_dialog: DatasetInfoDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App instance, loading the dataset eagerly
    ///
    /// The load happens exactly once. On failure the app still starts, but
    /// only to show the startup failure screen.
    pub fn new(data_path: PathBuf) -> App {
        let mut app = Self::create_app();
        app.domain.data_path = data_path.clone();

        match Dataset::load(&data_path) {
            Ok(dataset) => {
                app.selection
                    .initialize(dataset.entity_universe(), dataset.year_bounds());
                app.domain.dataset = Some(dataset);
                app.next_mode_after_splash = AppMode::Running;
                app.refresh_view();
            }
            Err(e) => {
                app.load_error = Some(load_error_message(&data_path, &e));
                app.next_mode_after_splash = AppMode::LoadFailed;
            }
        }

        app
    }

    fn create_app() -> App {
        App {
            mode: AppMode::Splash,
            next_mode_after_splash: AppMode::LoadFailed,
            domain: DomainState::new(),
            selection: SelectionState::default(),
            modals: ModalStack::new(),
            should_quit: false,
            load_error: None,
            status_message: None,
            // Components
            splash: SplashComponent::new(),
            home: HomeComponent::new(),
            chart: ChartComponent::new(),
            table: TableComponent::new(),
            quit_dialog: QuitDialog,
            entity_filter_dialog: EntityFilterDialog::new(),
            year_range_dialog: YearRangeDialog::default(),
            info_dialog: DatasetInfoDialog::default(),
            help_dialog: HelpDialog::default(),
        }
    }

    /// Recompute the filtered view and rebind the chart and table
    ///
    /// Called after every selection mutation. The view is derived from
    /// scratch each time - no caching, no diffing.
    fn refresh_view(&mut self) {
        if let Some(dataset) = &self.domain.dataset {
            let view = filter::filter(dataset, &self.selection);
            self.table.set_rows(&view);

            let binding = ChartBinding::new(view, self.selection.color_by());
            self.chart
                .set_binding(&binding, dataset.entity_universe(), dataset.year_bounds());
        }
    }

}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::LoadFailed => self.handle_error_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else {
                    self.home.handle_key_event(key)
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash && self.splash.is_complete() {
                    return Ok(Some(Action::SplashComplete));
                }
            }
            Action::SplashComplete => {
                self.mode = self.next_mode_after_splash;
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (delegate to TableComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.table.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenEntityFilter => {
                if let Some(dataset) = &self.domain.dataset {
                    self.entity_filter_dialog
                        .set_universe(dataset.entity_universe());
                    self.modals.push(Modal::EntityFilter { selected_index: 0 });
                }
            }
            Action::OpenYearRange => {
                if let Some(dataset) = &self.domain.dataset {
                    let (lo, hi) = self.selection.year_range();
                    self.year_range_dialog
                        .set_range(lo, hi, dataset.year_bounds());
                    self.modals.push(Modal::YearRange { lo, hi });
                }
            }
            Action::OpenDatasetInfo => {
                if self.modals.top() == Some(&Modal::DatasetInfo) {
                    self.modals.pop();
                } else {
                    self.modals.push(Modal::DatasetInfo);
                }
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => {
                // Keep the modal variant's cursor in sync for the entity list
                if let Some(Modal::EntityFilter { selected_index }) = self.modals.top_mut() {
                    *selected_index = match action {
                        Action::ModalUp => selected_index.saturating_sub(1),
                        _ => selected_index.saturating_add(1),
                    };
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Selection
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleEntity(entity) => {
                self.selection.toggle_entity(&entity);
                self.refresh_view();
            }
            Action::ClearSelection => {
                self.selection.clear_all();
                self.status_message = Some("Selection cleared".to_string());
                self.refresh_view();
            }
            Action::SelectAllEntities => {
                if let Some(dataset) = &self.domain.dataset {
                    self.selection.select_all(dataset.entity_universe());
                }
                self.status_message = Some("All countries selected".to_string());
                self.refresh_view();
            }
            Action::SetYearRange(lo, hi) => {
                match self.selection.set_year_range(lo, hi) {
                    Ok(()) => {
                        self.status_message = Some(format!("Year range {} – {}", lo, hi));
                        self.modals.pop();
                        self.refresh_view();
                    }
                    // Prior state stays intact; the dialog stays open
                    Err(e) => self.status_message = Some(e.to_string()),
                }
            }
            Action::CycleColorBy => {
                let next = self.selection.color_by().next();
                self.selection.set_color_by(next);
                self.status_message = Some(format!("Color by {}", next));
                self.refresh_view();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area)?,
            AppMode::LoadFailed => self.draw_load_error(frame, area),
            AppMode::Running => {
                let ctx = HomeRenderContext {
                    selection: &self.selection,
                    universe_size: self
                        .domain
                        .dataset
                        .as_ref()
                        .map(|d| d.entity_universe().len())
                        .unwrap_or(0),
                    filtered_rows: self.table.row_count(),
                    total_rows: self.domain.dataset.as_ref().map(Dataset::len).unwrap_or(0),
                    data_path: &self.domain.data_path,
                    status_message: self.status_message.as_deref(),
                };

                draw_home_screen(frame, area, &mut self.chart, &mut self.table, &ctx)?;

                // Draw modal overlay if active
                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::EntityFilter { .. } => self.entity_filter_dialog.handle_key_event(key),
            Modal::YearRange { .. } => self.year_range_dialog.handle_key_event(key),
            Modal::DatasetInfo => self.info_dialog.handle_key_event(key),
            Modal::Help { .. } => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::EntityFilter { .. } => {
                self.entity_filter_dialog
                    .draw_with_selection(frame, area, &self.selection)?;
            }
            Modal::YearRange { .. } => self.year_range_dialog.draw(frame, area)?,
            Modal::DatasetInfo => {
                if let Some(dataset) = &self.domain.dataset {
                    self.info_dialog
                        .draw_with_dataset(frame, area, dataset, &self.domain.data_path)?;
                }
            }
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }

    /// Handle key events on the startup failure screen
    fn handle_error_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Ok(Some(Action::ForceQuit)),
            _ => Ok(None),
        }
    }

    /// Draw the startup failure screen
    fn draw_load_error(&self, frame: &mut Frame, area: Rect) {
        use ratatui::style::{Color, Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

        let message = self
            .load_error
            .as_deref()
            .unwrap_or("Unknown startup failure");

        let mut lines: Vec<Line> = message
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                " q ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Quit"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Startup Failure ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    const SAMPLE: &str = "\
entity,year,pct_cals_from_carbs,overweight_or_obese
USA,2000,40.0,30.0
USA,2010,42.0,35.0
FRA,2000,38.0,20.0
";

    fn write_sample(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("obesity-tui-{}-{}.csv", std::process::id(), name));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_app_initializes_selection_from_dataset() {
        let path = write_sample("init");
        let app = App::new(path.clone());
        fs::remove_file(&path).ok();

        assert_eq!(app.next_mode_after_splash, AppMode::Running);
        assert_eq!(app.selection.selected_count(), 2);
        assert_eq!(app.selection.year_range(), (2000, 2010));
        assert_eq!(app.table.row_count(), 3);
    }

    #[test]
    fn test_clear_selection_empties_the_view() {
        let path = write_sample("clear");
        let mut app = App::new(path.clone());
        fs::remove_file(&path).ok();

        app.update(Action::ClearSelection).unwrap();
        assert_eq!(app.table.row_count(), 0);

        app.update(Action::SelectAllEntities).unwrap();
        assert_eq!(app.table.row_count(), 3);
    }

    #[test]
    fn test_toggle_entity_refilters() {
        let path = write_sample("toggle");
        let mut app = App::new(path.clone());
        fs::remove_file(&path).ok();

        app.update(Action::ToggleEntity("USA".to_string())).unwrap();
        assert_eq!(app.table.row_count(), 1);
    }

    #[test]
    fn test_set_year_range_refilters() {
        let path = write_sample("years");
        let mut app = App::new(path.clone());
        fs::remove_file(&path).ok();

        app.update(Action::SetYearRange(2000, 2000)).unwrap();
        assert_eq!(app.table.row_count(), 2);
    }

    #[test]
    fn test_missing_file_enters_load_failed_mode() {
        let app = App::new(PathBuf::from("/nonexistent/data.csv"));
        assert_eq!(app.next_mode_after_splash, AppMode::LoadFailed);
        assert!(app.load_error.is_some());
    }
}
