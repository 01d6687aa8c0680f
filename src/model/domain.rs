//! Domain state - business/data state separate from UI concerns

use super::dataset::Dataset;
use std::path::PathBuf;

/// Domain state containing the loaded data
///
/// The dataset is loaded once at startup and owned here for the lifetime
/// of the session. Nothing reloads or invalidates it.
#[derive(Debug, Default)]
pub struct DomainState {
    /// The loaded dataset (None only before load / after a failed load)
    pub dataset: Option<Dataset>,

    /// Path the dataset was loaded from
    pub data_path: PathBuf,
}

impl DomainState {
    pub fn new() -> Self {
        Self {
            dataset: None,
            data_path: PathBuf::new(),
        }
    }
}
