//! Table store - loads the nutrition dataset into memory
//!
//! The dataset is read once at startup and never mutated afterwards.
//! Everything else in the app reads through the `Dataset` accessors.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Columns the data file must provide
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "entity",
    "year",
    "pct_cals_from_carbs",
    "overweight_or_obese",
];

/// One (country, year) observation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row {
    /// Country or region name
    pub entity: String,
    pub year: i32,
    /// Percentage of calories from carbohydrates
    pub pct_cals_from_carbs: f64,
    /// Percentage of the population overweight or obese
    pub overweight_or_obese: f64,
}

/// Errors that can occur while loading the data file
///
/// All of these are fatal to session start - the app shows a startup
/// failure screen and offers no way to continue without data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read data file: {0}")]
    Io(#[from] io::Error),

    #[error("data file is missing required column '{0}'")]
    MissingColumn(String),

    #[error("malformed data file: {0}")]
    Malformed(#[from] csv::Error),

    #[error("data file contains no rows")]
    Empty,
}

/// The loaded dataset: an ordered, immutable sequence of rows
///
/// The entity universe and year bounds are computed once at load time
/// so the selection dialogs never have to rescan the rows.
#[derive(Debug)]
pub struct Dataset {
    rows: Vec<Row>,
    entities: Vec<String>,
    min_year: i32,
    max_year: i32,
}

impl Dataset {
    /// Load the dataset from a CSV file
    pub fn load(path: &Path) -> Result<Dataset, LoadError> {
        let file = fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load the dataset from any reader (used directly by tests)
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Dataset, LoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        // Validate headers before deserializing so a missing column is
        // reported by name rather than as a generic parse failure.
        let headers = csv_reader.headers()?.clone();
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                return Err(LoadError::MissingColumn(required.to_string()));
            }
        }

        let mut rows = Vec::new();
        for result in csv_reader.deserialize() {
            let row: Row = result?;
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(LoadError::Empty);
        }

        // Distinct entities, sorted for deterministic display order
        let entities: Vec<String> = rows
            .iter()
            .map(|r| r.entity.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let min_year = rows.iter().map(|r| r.year).min().unwrap_or(0);
        let max_year = rows.iter().map(|r| r.year).max().unwrap_or(0);

        Ok(Dataset {
            rows,
            entities,
            min_year,
            max_year,
        })
    }

    /// All rows in file order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The sorted set of distinct entity names
    pub fn entity_universe(&self) -> &[String] {
        &self.entities
    }

    /// The (min_year, max_year) present in the dataset
    pub fn year_bounds(&self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
entity,year,pct_cals_from_carbs,overweight_or_obese
United States,2000,40.0,30.0
United States,2010,42.0,35.0
France,2000,38.0,20.0
";

    #[test]
    fn test_load_sample_data() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.rows()[0].entity, "United States");
        assert_eq!(dataset.rows()[2].year, 2000);
        assert_eq!(dataset.rows()[1].pct_cals_from_carbs, 42.0);
    }

    #[test]
    fn test_entity_universe_sorted_and_distinct() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            dataset.entity_universe(),
            ["France".to_string(), "United States".to_string()]
        );
    }

    #[test]
    fn test_year_bounds() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.year_bounds(), (2000, 2010));
    }

    #[test]
    fn test_missing_column_reported_by_name() {
        let data = "entity,year,pct_cals_from_carbs\nFrance,2000,38.0\n";
        let err = Dataset::from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::MissingColumn(col) => assert_eq!(col, "overweight_or_obese"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_record() {
        let data = "\
entity,year,pct_cals_from_carbs,overweight_or_obese
France,not_a_year,38.0,20.0
";
        let err = Dataset::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_empty_file_rejected() {
        let data = "entity,year,pct_cals_from_carbs,overweight_or_obese\n";
        let err = Dataset::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::load(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
