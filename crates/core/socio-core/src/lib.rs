//! SocioAI Core
//!
//! Core types and transforms for the SocioAI chat relay:
//!
//! - Markdown table extraction from assistant replies
//! - Projection of extracted tables into chart-ready series
//! - Relay wire types and the per-turn reply pipeline
//! - The [`FlowClient`] seam implemented by upstream providers
//! - Error type, environment configuration and logging
//!
//! # Example
//!
//! ```
//! use socio_core::{extract_table, project_series, ChartConfig};
//!
//! let reply = "|Post Type|Likes|Shares|\n|-|-|-|\n|Photo|120|30|";
//! let table = extract_table(reply).unwrap();
//! let series = project_series(&table, &ChartConfig::default()).unwrap().unwrap();
//! assert_eq!(series.metric_headers, vec!["Likes", "Shares"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chart;
pub mod config;
pub mod error;
pub mod flow;
pub mod message;
pub mod table;
pub mod types;
pub mod utils;

// Re-export main types
pub use chart::{
    project_series, ChartConfig, ChartKind, ChartSeries, ColorAssignment, PaletteOverflow,
    SeriesPoint,
};
pub use config::{
    get_env_bool, get_env_int, get_env_list, get_env_or, get_required_env, load_env,
    load_env_from_path, validate_env,
};
pub use error::{Result, SocioError};
pub use flow::FlowClient;
pub use message::display_text;
pub use table::{extract_table, Cell, ParsedTable};
pub use types::{
    ChartRequest, ChartResponse, ChatReply, ChatRequest, ErrorReply, ReplyData,
    GENERIC_FAILURE_MESSAGE,
};
pub use utils::logger::{init_logging, subscribe_logs, LogEvent};
