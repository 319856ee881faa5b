//! Chart projection configuration

use crate::config::{get_env_int, get_env_list, get_env_or};
use crate::{Result, SocioError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Header names that label rows or carry totals rather than metrics
pub const DEFAULT_EXCLUDED_HEADERS: [&str; 3] = ["Post Type", "post_id", "Total Posts"];

/// Series colors, assigned by metric position
pub const DEFAULT_PALETTE: [&str; 3] = ["#FF6B6B", "#4ECDC4", "#45B7D1"];

/// Rows shown per chart
pub const DEFAULT_MAX_ROWS: usize = 3;

/// What to do when there are more metrics than palette colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteOverflow {
    /// Wrap around: metric `i` gets `palette[i % palette.len()]`
    #[default]
    Cycle,
    /// Fail the projection with [`SocioError::TooManyMetrics`]
    Reject,
}

impl FromStr for PaletteOverflow {
    type Err = SocioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cycle" => Ok(PaletteOverflow::Cycle),
            "reject" => Ok(PaletteOverflow::Reject),
            other => Err(SocioError::config(format!(
                "Unknown palette overflow policy '{}', expected 'cycle' or 'reject'",
                other
            ))),
        }
    }
}

/// Presentation mode for projected series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Grouped bars per point
    #[default]
    Bar,
    /// One line per metric
    Line,
    /// One polygon per metric around the point labels
    Radar,
    /// Filled lines
    Area,
}

impl ChartKind {
    /// All modes, in the order the page offers them
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Radar,
        ChartKind::Area,
    ];

    /// Wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Radar => "radar",
            ChartKind::Area => "area",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = SocioError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        ChartKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| SocioError::validation(format!("Unknown chart kind '{}'", s)))
    }
}

/// Configuration for [`project_series`](super::project_series)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Header names never treated as metrics (exact, case-sensitive)
    pub excluded_headers: BTreeSet<String>,

    /// Colors assigned to metrics by position
    pub palette: Vec<String>,

    /// Only the first `max_rows` data rows become points
    pub max_rows: usize,

    /// Behavior when metrics outnumber palette colors
    pub overflow: PaletteOverflow,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            excluded_headers: DEFAULT_EXCLUDED_HEADERS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            max_rows: DEFAULT_MAX_ROWS,
            overflow: PaletteOverflow::default(),
        }
    }
}

impl ChartConfig {
    /// Load from environment variables, falling back to defaults
    ///
    /// - `CHART_MAX_ROWS`
    /// - `CHART_PALETTE` (comma-separated)
    /// - `CHART_EXCLUDED_HEADERS` (comma-separated)
    /// - `CHART_PALETTE_OVERFLOW` (`cycle` | `reject`)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_rows = match get_env_int("CHART_MAX_ROWS", defaults.max_rows) {
            0 => {
                warn!("CHART_MAX_ROWS must be at least 1, using {}", DEFAULT_MAX_ROWS);
                DEFAULT_MAX_ROWS
            }
            n => n,
        };

        let overflow = get_env_or("CHART_PALETTE_OVERFLOW", "cycle")
            .parse()
            .unwrap_or_else(|e| {
                warn!("{}, using cycle", e);
                PaletteOverflow::Cycle
            });

        Self {
            excluded_headers: get_env_list("CHART_EXCLUDED_HEADERS")
                .map(|list| list.into_iter().collect())
                .unwrap_or(defaults.excluded_headers),
            palette: get_env_list("CHART_PALETTE").unwrap_or(defaults.palette),
            max_rows,
            overflow,
        }
    }

    /// Set the row cap
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Set the palette overflow policy
    pub fn with_overflow(mut self, overflow: PaletteOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Replace the palette
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `header` is excluded from the metric set
    pub fn is_excluded(&self, header: &str) -> bool {
        self.excluded_headers.contains(header)
    }

    /// Check the config can drive a projection
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(SocioError::config("Chart palette must have at least one color"));
        }
        if self.max_rows == 0 {
            return Err(SocioError::config("Chart max_rows must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.max_rows, 3);
        assert_eq!(config.palette, vec!["#FF6B6B", "#4ECDC4", "#45B7D1"]);
        assert!(config.is_excluded("Post Type"));
        assert!(config.is_excluded("post_id"));
        assert!(config.is_excluded("Total Posts"));
        assert!(!config.is_excluded("post type"));
        assert_eq!(config.overflow, PaletteOverflow::Cycle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unusable_config() {
        let empty_palette = ChartConfig::default().with_palette(Vec::<String>::new());
        assert!(empty_palette.validate().is_err());

        let no_rows = ChartConfig::default().with_max_rows(0);
        assert!(no_rows.validate().is_err());
    }

    #[test]
    fn test_overflow_parsing() {
        assert_eq!("Reject".parse::<PaletteOverflow>().unwrap(), PaletteOverflow::Reject);
        assert_eq!(" cycle ".parse::<PaletteOverflow>().unwrap(), PaletteOverflow::Cycle);
        assert!("wrap".parse::<PaletteOverflow>().is_err());
    }

    #[test]
    fn test_chart_kind_round_trip() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>().unwrap(), kind);
        }
        assert_eq!("RADAR".parse::<ChartKind>().unwrap(), ChartKind::Radar);
        assert!("pie".parse::<ChartKind>().is_err());
        assert_eq!(ChartKind::default(), ChartKind::Bar);
        assert_eq!(serde_json::to_string(&ChartKind::Area).unwrap(), "\"area\"");
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("CHART_MAX_ROWS", "5");
        std::env::set_var("CHART_PALETTE", "#000, #fff");
        std::env::set_var("CHART_EXCLUDED_HEADERS", "Platform");
        std::env::set_var("CHART_PALETTE_OVERFLOW", "reject");

        let config = ChartConfig::from_env();
        assert_eq!(config.max_rows, 5);
        assert_eq!(config.palette, vec!["#000", "#fff"]);
        assert!(config.is_excluded("Platform"));
        assert!(!config.is_excluded("Post Type"));
        assert_eq!(config.overflow, PaletteOverflow::Reject);

        std::env::remove_var("CHART_MAX_ROWS");
        std::env::remove_var("CHART_PALETTE");
        std::env::remove_var("CHART_EXCLUDED_HEADERS");
        std::env::remove_var("CHART_PALETTE_OVERFLOW");
    }
}
