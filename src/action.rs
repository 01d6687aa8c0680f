//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations/updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Transition from splash to main app
    SplashComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll the table up one row
    ScrollUp,
    /// Scroll the table down one row
    ScrollDown,
    /// Scroll the table up one page
    PageUp,
    /// Scroll the table down one page
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open the country multiselect dialog
    OpenEntityFilter,
    /// Open the year range editor
    OpenYearRange,
    /// Open dataset info overlay
    OpenDatasetInfo,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Navigate up in modal (e.g., previous option)
    ModalUp,
    /// Navigate down in modal (e.g., next option)
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle one country in or out of the selection
    ToggleEntity(String),
    /// Deselect every country (the "Clear" button)
    ClearSelection,
    /// Select every country in the universe (the "All" button)
    SelectAllEntities,
    /// Apply a new [lo, hi] year range
    SetYearRange(i32, i32),
    /// Cycle the color dimension (entity -> year -> none)
    CycleColorBy,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenEntityFilter => write!(f, "OpenEntityFilter"),
            Action::OpenYearRange => write!(f, "OpenYearRange"),
            Action::OpenDatasetInfo => write!(f, "OpenDatasetInfo"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::ToggleEntity(entity) => write!(f, "ToggleEntity({})", entity),
            Action::ClearSelection => write!(f, "ClearSelection"),
            Action::SelectAllEntities => write!(f, "SelectAllEntities"),
            Action::SetYearRange(lo, hi) => write!(f, "SetYearRange({}, {})", lo, hi),
            Action::CycleColorBy => write!(f, "CycleColorBy"),
        }
    }
}
