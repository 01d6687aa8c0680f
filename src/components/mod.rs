//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod chart;
pub mod entity_filter_dialog;
pub mod help_dialog;
pub mod home;
pub mod info;
pub mod layout;
pub mod quit_dialog;
pub mod splash;
pub mod table;
pub mod year_range_dialog;

pub use chart::ChartComponent;
pub use entity_filter_dialog::EntityFilterDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use info::DatasetInfoDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use splash::SplashComponent;
pub use table::TableComponent;
pub use year_range_dialog::YearRangeDialog;
