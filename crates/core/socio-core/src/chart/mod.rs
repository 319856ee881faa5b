//! Chart series projection
//!
//! Turns a [`ParsedTable`](crate::table::ParsedTable) into points and colors a
//! bar/line/radar/area renderer can draw directly.

pub mod config;
pub mod projector;

pub use config::{
    ChartConfig, ChartKind, PaletteOverflow, DEFAULT_EXCLUDED_HEADERS, DEFAULT_MAX_ROWS,
    DEFAULT_PALETTE,
};
pub use projector::{project_series, ChartSeries, ColorAssignment, SeriesPoint};
