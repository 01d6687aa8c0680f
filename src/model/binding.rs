//! View binding - the input contract for the chart and table panes
//!
//! Translates a filtered view plus the color choice into the neutral shape
//! the renderers consume: which columns go on which axis, what (if
//! anything) groups the points, and which fields surface on inspection.
//! Pure field selection, nothing computed.

use super::dataset::Row;
use super::selection::ColorBy;

pub const X_FIELD: &str = "pct_cals_from_carbs";
pub const Y_FIELD: &str = "overweight_or_obese";
pub const X_LABEL: &str = "Percentage of Calories from Carbohydrates";
pub const Y_LABEL: &str = "Percentage Overweight or Obese";

/// Fields surfaced for row inspection (the table's column set)
pub const INSPECT_FIELDS: [&str; 4] = [
    "entity",
    "year",
    "pct_cals_from_carbs",
    "overweight_or_obese",
];

/// Bound input for the chart renderer
pub struct ChartBinding<'a> {
    rows: Vec<&'a Row>,
    color_by: ColorBy,
}

impl<'a> ChartBinding<'a> {
    pub fn new(rows: Vec<&'a Row>, color_by: ColorBy) -> Self {
        Self { rows, color_by }
    }

    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    pub fn x_field(&self) -> &'static str {
        X_FIELD
    }

    pub fn y_field(&self) -> &'static str {
        Y_FIELD
    }

    pub fn x_label(&self) -> &'static str {
        X_LABEL
    }

    pub fn y_label(&self) -> &'static str {
        Y_LABEL
    }

    /// Column grouping the points into colored series, if any
    pub fn group_field(&self) -> Option<&'static str> {
        match self.color_by {
            ColorBy::Entity => Some("entity"),
            ColorBy::Year => Some("year"),
            ColorBy::None => None,
        }
    }

    pub fn color_by(&self) -> ColorBy {
        self.color_by
    }

    /// Fields to surface when inspecting a row
    pub fn inspect_fields(&self) -> &'static [&'static str] {
        &INSPECT_FIELDS
    }

    /// The (x, y) value of one bound row
    pub fn point(row: &Row) -> (f64, f64) {
        (row.pct_cals_from_carbs, row.overweight_or_obese)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entity: &str, year: i32) -> Row {
        Row {
            entity: entity.to_string(),
            year,
            pct_cals_from_carbs: 40.0,
            overweight_or_obese: 30.0,
        }
    }

    #[test]
    fn test_axis_fields_are_fixed() {
        let rows = [row("USA", 2000)];
        let binding = ChartBinding::new(rows.iter().collect(), ColorBy::Entity);
        assert_eq!(binding.x_field(), "pct_cals_from_carbs");
        assert_eq!(binding.y_field(), "overweight_or_obese");
    }

    #[test]
    fn test_group_field_follows_color_choice() {
        let rows = [row("USA", 2000)];
        let by_entity = ChartBinding::new(rows.iter().collect(), ColorBy::Entity);
        assert_eq!(by_entity.group_field(), Some("entity"));

        let by_year = ChartBinding::new(rows.iter().collect(), ColorBy::Year);
        assert_eq!(by_year.group_field(), Some("year"));

        let uncolored = ChartBinding::new(rows.iter().collect(), ColorBy::None);
        assert_eq!(uncolored.group_field(), None);
    }

    #[test]
    fn test_inspect_fields_cover_the_full_row() {
        let rows = [row("USA", 2000)];
        let binding = ChartBinding::new(rows.iter().collect(), ColorBy::None);
        assert_eq!(
            binding.inspect_fields(),
            ["entity", "year", "pct_cals_from_carbs", "overweight_or_obese"]
        );
    }

    #[test]
    fn test_point_extraction() {
        let r = row("USA", 2000);
        assert_eq!(ChartBinding::point(&r), (40.0, 30.0));
    }

    #[test]
    fn test_binding_preserves_row_order() {
        let rows = [row("USA", 2000), row("FRA", 2001), row("JPN", 2002)];
        let binding = ChartBinding::new(rows.iter().collect(), ColorBy::Entity);
        let years: Vec<i32> = binding.rows().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2001, 2002]);
    }
}
