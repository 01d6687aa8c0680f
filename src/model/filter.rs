//! Filter engine - derives the visible subset of the dataset
//!
//! A pure function from (dataset, selection) to a filtered view. The view
//! is recomputed from scratch on every state change; the table is small
//! enough that a linear pass per keystroke is fine.

use super::dataset::{Dataset, Row};
use super::selection::SelectionState;

/// Rows matching the current selection, in dataset order
///
/// A row is kept when its entity is selected AND its year falls inside the
/// closed [lo, hi] interval. An empty selected-entities set yields an
/// empty view - that is the "Clear" use case, not an error.
pub fn filter<'a>(dataset: &'a Dataset, selection: &SelectionState) -> Vec<&'a Row> {
    let (lo, hi) = selection.year_range();
    dataset
        .rows()
        .iter()
        .filter(|row| selection.is_selected(&row.entity))
        .filter(|row| lo <= row.year && row.year <= hi)
        .collect()
}
