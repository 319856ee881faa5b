//! Series projection: parsed table to chart-ready points and colors

use super::config::{ChartConfig, PaletteOverflow};
use crate::table::{Cell, ParsedTable};
use crate::{Result, SocioError};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::debug;

/// One chart point: the row label plus one value per metric.
///
/// Serializes flat, e.g. `{"name":"Photo","Likes":120.0,"Shares":30.0}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// First cell of the source row, verbatim
    pub name: Cell,
    /// Metric values in metric order
    pub values: Vec<(String, f64)>,
}

impl SeriesPoint {
    /// Value of `metric` at this point
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(m, _)| m == metric)
            .map(|(_, v)| *v)
    }
}

impl Serialize for SeriesPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("name", &self.name)?;
        for (metric, value) in &self.values {
            map.serialize_entry(metric, value)?;
        }
        map.end()
    }
}

/// Metric name to color token, in metric order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorAssignment(Vec<(String, String)>);

impl ColorAssignment {
    /// Color assigned to `metric`
    pub fn get(&self, metric: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(m, _)| m == metric)
            .map(|(_, c)| c.as_str())
    }

    /// `(metric, color)` pairs in metric order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(m, c)| (m.as_str(), c.as_str()))
    }

    /// Number of colored metrics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no metric has a color
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ColorAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (metric, color) in &self.0 {
            map.serialize_entry(metric, color)?;
        }
        map.end()
    }
}

/// Chart-ready projection of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Metric columns, in header order; repeated headers are kept
    pub metric_headers: Vec<String>,
    /// One point per retained row
    pub points: Vec<SeriesPoint>,
    /// Color per metric
    pub colors: ColorAssignment,
}

/// Project a parsed table into chart series.
///
/// Returns `Ok(None)` when the table has no headers or no rows. Fails only
/// when the config is unusable or, under [`PaletteOverflow::Reject`], when
/// metrics outnumber palette colors.
pub fn project_series(table: &ParsedTable, config: &ChartConfig) -> Result<Option<ChartSeries>> {
    if table.headers.is_empty() || table.rows.is_empty() {
        return Ok(None);
    }
    config.validate()?;

    let metric_headers: Vec<String> = table
        .headers
        .iter()
        .filter(|h| !config.is_excluded(h))
        .cloned()
        .collect();

    // A repeated header reads from its first column
    let mut columns: Vec<(&str, Option<usize>)> = Vec::new();
    for metric in &metric_headers {
        if columns.iter().all(|(m, _)| *m != metric.as_str()) {
            columns.push((
                metric.as_str(),
                table.headers.iter().position(|h| h == metric),
            ));
        }
    }

    let colors = assign_colors(&metric_headers, config)?;

    let points: Vec<SeriesPoint> = table
        .rows
        .iter()
        .take(config.max_rows)
        .filter_map(|row| {
            let name = row.first()?.clone();
            let values = columns
                .iter()
                .map(|(metric, idx)| {
                    let value = idx
                        .and_then(|i| row.get(i))
                        .and_then(Cell::as_number)
                        .unwrap_or(0.0);
                    (metric.to_string(), value)
                })
                .collect();
            Some(SeriesPoint { name, values })
        })
        .collect();

    debug!(
        "Projected {} points over {} metrics",
        points.len(),
        metric_headers.len()
    );

    Ok(Some(ChartSeries {
        metric_headers,
        points,
        colors,
    }))
}

fn assign_colors(metrics: &[String], config: &ChartConfig) -> Result<ColorAssignment> {
    let palette = &config.palette;
    if metrics.len() > palette.len() && config.overflow == PaletteOverflow::Reject {
        return Err(SocioError::too_many_metrics(metrics.len(), palette.len()));
    }
    // Colors follow metric position; a repeated metric keeps its first slot
    // in the map and takes the color of its last position
    let mut colors: Vec<(String, String)> = Vec::new();
    for (i, metric) in metrics.iter().enumerate() {
        let color = palette[i % palette.len()].clone();
        match colors.iter_mut().find(|(m, _)| m == metric) {
            Some(entry) => entry.1 = color,
            None => colors.push((metric.clone(), color)),
        }
    }
    Ok(ColorAssignment(colors))
}
