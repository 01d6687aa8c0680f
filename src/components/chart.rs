//! Scatter chart pane
//!
//! Consumes the view binding and renders carbohydrate intake against
//! obesity rate with ratatui's Chart widget. Series grouping by the
//! binding's group field happens here - the binding itself stays a pure
//! field mapping.

use crate::component::Component;
use crate::model::binding::ChartBinding;
use crate::model::selection::ColorBy;
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset as ChartDataset, GraphType, Paragraph},
    Frame,
};

const TITLE: &str = " Relationship between Carbohydrate Intake and Obesity Rates ";

/// Colors cycled across entity series
const ENTITY_PALETTE: [Color; 12] = [
    Color::Cyan,
    Color::Magenta,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightMagenta,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightRed,
];

/// Cold-to-warm ramp for year series
const YEAR_PALETTE: [Color; 7] = [
    Color::Blue,
    Color::LightBlue,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::LightRed,
    Color::Red,
];

/// Series names clutter the plot past this many groups
const MAX_LEGEND_SERIES: usize = 8;

/// One colored point group on the chart
struct Series {
    label: String,
    color: Color,
    points: Vec<(f64, f64)>,
}

/// Scatter chart pane
pub struct ChartComponent {
    series: Vec<Series>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_label: &'static str,
    y_label: &'static str,
    point_count: usize,
}

impl Default for ChartComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartComponent {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            x_bounds: [0.0, 1.0],
            y_bounds: [0.0, 1.0],
            x_label: "",
            y_label: "",
            point_count: 0,
        }
    }

    /// Rebuild the chart series from a freshly bound view
    ///
    /// `entity_universe` keeps entity colors stable across refilters;
    /// `year_bounds` anchors the year color ramp to the full dataset span
    /// rather than the filtered one.
    pub fn set_binding(
        &mut self,
        binding: &ChartBinding,
        entity_universe: &[String],
        year_bounds: (i32, i32),
    ) {
        self.x_label = binding.x_label();
        self.y_label = binding.y_label();
        self.point_count = binding.rows().len();

        self.series = match binding.color_by() {
            ColorBy::Entity => Self::series_by_entity(binding, entity_universe),
            ColorBy::Year => Self::series_by_year(binding, year_bounds),
            ColorBy::None => {
                let points = binding.rows().iter().map(|r| ChartBinding::point(r)).collect();
                vec![Series {
                    label: String::new(),
                    color: Color::Cyan,
                    points,
                }]
            }
        };

        self.recompute_bounds();
    }

    fn series_by_entity(binding: &ChartBinding, universe: &[String]) -> Vec<Series> {
        // Universe order keeps colors and legend order deterministic
        let mut series: Vec<Series> = Vec::new();
        for (idx, entity) in universe.iter().enumerate() {
            let points: Vec<(f64, f64)> = binding
                .rows()
                .iter()
                .filter(|r| &r.entity == entity)
                .map(|r| ChartBinding::point(r))
                .collect();
            if points.is_empty() {
                continue;
            }
            series.push(Series {
                label: entity.clone(),
                color: ENTITY_PALETTE[idx % ENTITY_PALETTE.len()],
                points,
            });
        }
        series
    }

    fn series_by_year(binding: &ChartBinding, year_bounds: (i32, i32)) -> Vec<Series> {
        let (min_year, max_year) = year_bounds;
        let span = (max_year - min_year).max(1) as f64;

        let mut years: Vec<i32> = binding.rows().iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        years
            .into_iter()
            .map(|year| {
                let t = (year - min_year) as f64 / span;
                let idx = (t * (YEAR_PALETTE.len() - 1) as f64).round() as usize;
                let points: Vec<(f64, f64)> = binding
                    .rows()
                    .iter()
                    .filter(|r| r.year == year)
                    .map(|r| ChartBinding::point(r))
                    .collect();
                Series {
                    label: year.to_string(),
                    color: YEAR_PALETTE[idx.min(YEAR_PALETTE.len() - 1)],
                    points,
                }
            })
            .collect()
    }

    /// Pad the data extent so edge points don't sit on the axes
    fn recompute_bounds(&mut self) {
        let xs = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let ys = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1));

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for x in xs {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
        }
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for y in ys {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        if self.point_count == 0 {
            self.x_bounds = [0.0, 1.0];
            self.y_bounds = [0.0, 1.0];
            return;
        }

        let x_pad = ((x_max - x_min) * 0.05).max(0.5);
        let y_pad = ((y_max - y_min) * 0.05).max(0.5);
        self.x_bounds = [x_min - x_pad, x_max + x_pad];
        self.y_bounds = [y_min - y_pad, y_max + y_pad];
    }

    fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
        let mid = (bounds[0] + bounds[1]) / 2.0;
        vec![
            Span::raw(format!("{:.1}", bounds[0])),
            Span::raw(format!("{:.1}", mid)),
            Span::raw(format!("{:.1}", bounds[1])),
        ]
    }
}

impl Component for ChartComponent {
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(TITLE)
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        if self.point_count == 0 {
            // Valid, expected state after Clear - render gracefully
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No data points for the current filters",
                    Style::default().fg(Color::Yellow),
                )),
            ])
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
            frame.render_widget(placeholder, area);
            return Ok(());
        }

        let show_legend = self.series.len() <= MAX_LEGEND_SERIES;
        let datasets: Vec<ChartDataset> = self
            .series
            .iter()
            .map(|s| {
                let name = if show_legend { s.label.as_str() } else { "" };
                ChartDataset::default()
                    .name(name)
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(s.color))
                    .data(&s.points)
            })
            .collect();

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        self.x_label,
                        Style::default().fg(Color::DarkGray),
                    ))
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds(self.x_bounds)
                    .labels(Self::axis_labels(self.x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        self.y_label,
                        Style::default().fg(Color::DarkGray),
                    ))
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds(self.y_bounds)
                    .labels(Self::axis_labels(self.y_bounds)),
            );

        frame.render_widget(chart, area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    fn row(entity: &str, year: i32, carbs: f64, obese: f64) -> Row {
        Row {
            entity: entity.to_string(),
            year,
            pct_cals_from_carbs: carbs,
            overweight_or_obese: obese,
        }
    }

    fn universe() -> Vec<String> {
        vec!["FRA".to_string(), "USA".to_string()]
    }

    #[test]
    fn test_series_by_entity_follows_universe_order() {
        let rows = [row("USA", 2000, 40.0, 30.0), row("FRA", 2000, 38.0, 20.0)];
        let binding = ChartBinding::new(rows.iter().collect(), ColorBy::Entity);

        let mut chart = ChartComponent::new();
        chart.set_binding(&binding, &universe(), (2000, 2010));

        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["FRA", "USA"]);
    }

    #[test]
    fn test_entities_without_points_get_no_series() {
        let rows = [row("USA", 2000, 40.0, 30.0)];
        let binding = ChartBinding::new(rows.iter().collect(), ColorBy::Entity);

        let mut chart = ChartComponent::new();
        chart.set_binding(&binding, &universe(), (2000, 2010));

        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "USA");
    }

    #[test]
    fn test_series_by_year_one_per_distinct_year() {
        let rows = [
            row("USA", 2000, 40.0, 30.0),
            row("FRA", 2000, 38.0, 20.0),
            row("USA", 2010, 42.0, 35.0),
        ];
        let binding = ChartBinding::new(rows.iter().collect(), ColorBy::Year);

        let mut chart = ChartComponent::new();
        chart.set_binding(&binding, &universe(), (2000, 2010));

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, "2000");
        assert_eq!(chart.series[0].points.len(), 2);
        assert_eq!(chart.series[1].label, "2010");
    }

    #[test]
    fn test_no_color_collapses_to_single_series() {
        let rows = [row("USA", 2000, 40.0, 30.0), row("FRA", 2000, 38.0, 20.0)];
        let binding = ChartBinding::new(rows.iter().collect(), ColorBy::None);

        let mut chart = ChartComponent::new();
        chart.set_binding(&binding, &universe(), (2000, 2010));

        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points.len(), 2);
    }

    #[test]
    fn test_bounds_pad_the_data_extent() {
        let rows = [row("USA", 2000, 40.0, 30.0), row("FRA", 2000, 38.0, 20.0)];
        let binding = ChartBinding::new(rows.iter().collect(), ColorBy::None);

        let mut chart = ChartComponent::new();
        chart.set_binding(&binding, &universe(), (2000, 2010));

        assert!(chart.x_bounds[0] < 38.0);
        assert!(chart.x_bounds[1] > 40.0);
        assert!(chart.y_bounds[0] < 20.0);
        assert!(chart.y_bounds[1] > 30.0);
    }

    #[test]
    fn test_empty_binding_keeps_default_bounds() {
        let binding = ChartBinding::new(Vec::new(), ColorBy::Entity);

        let mut chart = ChartComponent::new();
        chart.set_binding(&binding, &universe(), (2000, 2010));

        assert_eq!(chart.point_count, 0);
        assert!(chart.series.is_empty());
        assert_eq!(chart.x_bounds, [0.0, 1.0]);
    }
}
