//! Relay wire types
//!
//! Request and response bodies of the chat relay, plus the per-turn pipeline
//! that turns assistant text into a reply.

use crate::chart::{project_series, ChartConfig, ChartKind, ChartSeries};
use crate::message::display_text;
use crate::table::{extract_table, ParsedTable};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// User-facing message for any failed turn
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while contacting the Langflow API. Please try again later.";

/// Request to send a message to the flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Message text
    pub message: String,
}

/// Successful relay reply
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// Assistant text, unmodified
    pub message: String,

    /// Assistant text as it should be displayed
    pub display_message: String,

    /// Table found in the text, if any
    pub data: Option<ReplyData>,
}

/// Structured data found in an assistant reply
#[derive(Debug, Clone, Serialize)]
pub struct ReplyData {
    /// Parsed table
    pub table: ParsedTable,

    /// Chart projection of `table`, when one could be made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSeries>,
}

/// Failure body returned with a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    /// Human-readable message
    pub error: String,
}

/// Request to project an already parsed table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Table to project
    pub table: ParsedTable,

    /// Presentation mode, defaults to bar
    #[serde(default)]
    pub kind: ChartKind,
}

/// Projection result
#[derive(Debug, Clone, Serialize)]
pub struct ChartResponse {
    /// Presentation mode echoed back
    pub kind: ChartKind,

    /// Projected series
    pub chart: ChartSeries,
}

impl ChatReply {
    /// Build the reply for one turn from the assistant's text.
    ///
    /// No table means `data: None`. A table that cannot be projected keeps
    /// `data.table` and drops `data.chart`.
    pub fn from_assistant_text(text: String, config: &ChartConfig) -> Self {
        let data = extract_table(&text).map(|table| {
            let chart = match project_series(&table, config) {
                Ok(chart) => chart,
                Err(e) => {
                    warn!("Skipping chart projection: {}", e);
                    None
                }
            };
            ReplyData { table, chart }
        });

        Self {
            display_message: display_text(&text).to_string(),
            message: text,
            data,
        }
    }
}
