//! Selection state - the user-chosen filter parameters
//!
//! Tracks which entities are selected, the active year window, and the
//! color dimension for the scatter plot. Mutated only by the discrete
//! operations below, one user action at a time.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Dimension used to color the scatter points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorBy {
    #[default]
    Entity,
    Year,
    None,
}

impl ColorBy {
    pub fn all() -> Vec<ColorBy> {
        vec![ColorBy::Entity, ColorBy::Year, ColorBy::None]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBy::Entity => "entity",
            ColorBy::Year => "year",
            ColorBy::None => "none",
        }
    }

    /// Cycle to the next dimension (entity -> year -> none -> entity)
    pub fn next(&self) -> ColorBy {
        match self {
            ColorBy::Entity => ColorBy::Year,
            ColorBy::Year => ColorBy::None,
            ColorBy::None => ColorBy::Entity,
        }
    }
}

impl fmt::Display for ColorBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColorBy {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "entity" => Ok(ColorBy::Entity),
            "year" => Ok(ColorBy::Year),
            "none" => Ok(ColorBy::None),
            other => Err(SelectionError::InvalidColorBy(other.to_string())),
        }
    }
}

/// Rejected selection mutations
///
/// These are programming/integration errors, not user errors: the dialogs
/// only offer valid choices, so hitting one of these means a caller passed
/// something outside the contract. The prior state is left intact.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid color dimension '{0}' (expected entity, year, or none)")]
    InvalidColorBy(String),

    #[error("invalid year range: {0} > {1}")]
    InvalidYearRange(i32, i32),
}

/// Current filter parameters for the session
///
/// Initialized from the dataset once it loads; afterwards only the
/// mutation methods below touch it. Membership of `selected_entities` in
/// the entity universe is the caller's responsibility - unknown names
/// simply match zero rows in the filter engine.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_entities: HashSet<String>,
    year_range: (i32, i32),
    color_by: ColorBy,
}

impl SelectionState {
    /// Reset to the full universe, full year range, colored by entity
    ///
    /// Called once after the dataset loads. Calling it again resets the
    /// selection to "all selected".
    pub fn initialize(&mut self, universe: &[String], year_bounds: (i32, i32)) {
        self.selected_entities = universe.iter().cloned().collect();
        self.year_range = year_bounds;
        self.color_by = ColorBy::Entity;
    }

    /// Replace the selected-entities set
    pub fn set_selected_entities(&mut self, entities: HashSet<String>) {
        self.selected_entities = entities;
    }

    /// Deselect everything (the "Clear" button)
    pub fn clear_all(&mut self) {
        self.selected_entities.clear();
    }

    /// Select the whole universe (the "All" button)
    pub fn select_all(&mut self, universe: &[String]) {
        self.selected_entities = universe.iter().cloned().collect();
    }

    /// Toggle a single entity in or out of the selection
    pub fn toggle_entity(&mut self, entity: &str) {
        if !self.selected_entities.remove(entity) {
            self.selected_entities.insert(entity.to_string());
        }
    }

    /// Set the closed year interval [lo, hi]
    ///
    /// Rejects inverted intervals. Values outside the dataset's bounds are
    /// accepted and simply yield a partial or empty match downstream.
    pub fn set_year_range(&mut self, lo: i32, hi: i32) -> Result<(), SelectionError> {
        if lo > hi {
            return Err(SelectionError::InvalidYearRange(lo, hi));
        }
        self.year_range = (lo, hi);
        Ok(())
    }

    pub fn set_color_by(&mut self, color_by: ColorBy) {
        self.color_by = color_by;
    }

    /// Set the color dimension from its string form
    ///
    /// The boundary for external string input (config files, tests). An
    /// out-of-enum value is rejected and the prior state kept.
    pub fn set_color_by_str(&mut self, s: &str) -> Result<(), SelectionError> {
        self.color_by = s.parse()?;
        Ok(())
    }

    pub fn selected_entities(&self) -> &HashSet<String> {
        &self.selected_entities
    }

    pub fn is_selected(&self, entity: &str) -> bool {
        self.selected_entities.contains(entity)
    }

    pub fn selected_count(&self) -> usize {
        self.selected_entities.len()
    }

    pub fn year_range(&self) -> (i32, i32) {
        self.year_range
    }

    pub fn color_by(&self) -> ColorBy {
        self.color_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> Vec<String> {
        vec![
            "France".to_string(),
            "Japan".to_string(),
            "United States".to_string(),
        ]
    }

    #[test]
    fn test_initialize_selects_everything() {
        let mut state = SelectionState::default();
        state.initialize(&universe(), (1990, 2020));

        assert_eq!(state.selected_count(), 3);
        assert!(state.is_selected("Japan"));
        assert_eq!(state.year_range(), (1990, 2020));
        assert_eq!(state.color_by(), ColorBy::Entity);
    }

    #[test]
    fn test_initialize_again_resets_to_all_selected() {
        let mut state = SelectionState::default();
        state.initialize(&universe(), (1990, 2020));
        state.clear_all();
        state.set_color_by(ColorBy::Year);

        state.initialize(&universe(), (1990, 2020));
        assert_eq!(state.selected_count(), 3);
        assert_eq!(state.color_by(), ColorBy::Entity);
    }

    #[test]
    fn test_clear_and_select_all() {
        let mut state = SelectionState::default();
        state.initialize(&universe(), (1990, 2020));

        state.clear_all();
        assert_eq!(state.selected_count(), 0);

        state.select_all(&universe());
        assert_eq!(state.selected_count(), 3);
    }

    #[test]
    fn test_toggle_entity() {
        let mut state = SelectionState::default();
        state.initialize(&universe(), (1990, 2020));

        state.toggle_entity("Japan");
        assert!(!state.is_selected("Japan"));
        assert_eq!(state.selected_count(), 2);

        state.toggle_entity("Japan");
        assert!(state.is_selected("Japan"));
    }

    #[test]
    fn test_set_selected_entities_is_idempotent() {
        let mut state = SelectionState::default();
        state.initialize(&universe(), (1990, 2020));

        let picked: HashSet<String> = ["France".to_string()].into_iter().collect();
        state.set_selected_entities(picked.clone());
        let first = state.selected_entities().clone();

        state.set_selected_entities(picked);
        assert_eq!(state.selected_entities(), &first);
    }

    #[test]
    fn test_set_year_range_rejects_inverted() {
        let mut state = SelectionState::default();
        state.initialize(&universe(), (1990, 2020));

        let err = state.set_year_range(2010, 2000).unwrap_err();
        assert_eq!(err, SelectionError::InvalidYearRange(2010, 2000));
        // Prior range untouched
        assert_eq!(state.year_range(), (1990, 2020));
    }

    #[test]
    fn test_set_year_range_does_not_clamp() {
        let mut state = SelectionState::default();
        state.initialize(&universe(), (1990, 2020));

        state.set_year_range(1800, 1850).unwrap();
        assert_eq!(state.year_range(), (1800, 1850));
    }

    #[test]
    fn test_color_by_parse() {
        assert_eq!("entity".parse::<ColorBy>().unwrap(), ColorBy::Entity);
        assert_eq!("Year".parse::<ColorBy>().unwrap(), ColorBy::Year);
        assert_eq!("None".parse::<ColorBy>().unwrap(), ColorBy::None);
    }

    #[test]
    fn test_invalid_color_by_leaves_state_intact() {
        let mut state = SelectionState::default();
        state.initialize(&universe(), (1990, 2020));
        state.set_color_by(ColorBy::Year);

        let err = state.set_color_by_str("county").unwrap_err();
        assert_eq!(err, SelectionError::InvalidColorBy("county".to_string()));
        assert_eq!(state.color_by(), ColorBy::Year);
    }

    #[test]
    fn test_color_by_cycle() {
        assert_eq!(ColorBy::Entity.next(), ColorBy::Year);
        assert_eq!(ColorBy::Year.next(), ColorBy::None);
        assert_eq!(ColorBy::None.next(), ColorBy::Entity);
    }
}
