//! Markdown table extraction
//!
//! Finds the pipe-delimited table embedded in free-form assistant output and
//! parses it into headers plus coerced data rows.
//!
//! Rules:
//! - a *table line* is a line holding an optional leading `|`, some
//!   non-blank content, then a `|`
//! - the first table line is the header row
//! - the second table line is always skipped as the markdown separator
//!   (`|---|---|`), whatever it contains
//! - every later table line is a data row
//!
//! The separator skip is positional. A table written without a separator row
//! loses its first data row.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Optional leading pipe, then content up to the last pipe on the line
static TABLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\|?(?P<content>.*)\|").expect("table line pattern is valid")
});

/// A single table cell, numeric when the text parses as a finite number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Cell text parsed as a number
    Numeric(f64),
    /// Cell text kept verbatim (trimmed)
    Text(String),
}

impl Cell {
    /// Build a cell from raw cell text, trimming and coercing to a number when possible
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match parse_number(trimmed) {
            Some(n) => Cell::Numeric(n),
            None => Cell::Text(trimmed.to_string()),
        }
    }

    /// Numeric view of the cell; text cells are re-parsed
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Numeric(n) => Some(*n),
            Cell::Text(s) => parse_number(s),
        }
    }

    /// Whether the cell holds a number
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Numeric(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Numeric(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Cell::parse(raw)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Numeric(n)
    }
}

/// Table parsed out of assistant text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Header cells, in column order
    pub headers: Vec<String>,
    /// Data rows; lengths are not checked against `headers`
    #[serde(alias = "data")]
    pub rows: Vec<Vec<Cell>>,
}

impl ParsedTable {
    /// Number of header columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Whether there is nothing to chart
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

/// Parse trimmed cell text as a finite number.
///
/// Empty text is not a number. `inf`/`NaN` spellings are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether `line` is a table line: optional leading `|`, non-blank content, then `|`
pub fn is_table_line(line: &str) -> bool {
    TABLE_LINE
        .captures(line)
        .is_some_and(|caps| !caps["content"].trim().is_empty())
}

/// Split a table line into trimmed cells.
///
/// One leading and one trailing pipe are removed first so they do not
/// produce empty edge cells; interior empty cells are kept.
pub fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

/// Extract the first markdown table from `text`.
///
/// Returns `None` when fewer than two table lines are present or the header
/// row has no columns. A table with a header and separator but no data rows
/// is returned with empty `rows`.
pub fn extract_table(text: &str) -> Option<ParsedTable> {
    let lines: Vec<&str> = text.lines().filter(|l| is_table_line(l)).collect();
    if lines.len() < 2 {
        return None;
    }

    let headers = split_cells(lines[0]);
    if headers.is_empty() {
        return None;
    }

    let rows: Vec<Vec<Cell>> = lines[2..]
        .iter()
        .map(|line| split_cells(line).iter().map(|c| Cell::parse(c)).collect())
        .collect();

    debug!(
        headers = ?headers,
        rows = rows.len(),
        "Extracted table from assistant text"
    );

    Some(ParsedTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Cell {
        Cell::Numeric(n)
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_no_pipes_means_no_table() {
        assert_eq!(extract_table("We analyzed your posts. Reels do best."), None);
        assert_eq!(extract_table(""), None);
    }

    #[test]
    fn test_single_table_line_is_not_enough() {
        assert_eq!(extract_table("intro\n| Likes | Shares |\noutro"), None);
    }

    #[test]
    fn test_bare_pipe_lines_are_ignored() {
        assert!(!is_table_line("|"));
        assert!(!is_table_line("||"));
        assert!(!is_table_line("|   |"));
        assert!(!is_table_line("| trailing content only"));
        assert!(is_table_line("A|B|C"));
        assert!(is_table_line("  | a | b |  "));
        assert!(is_table_line("a |"));
        assert!(is_table_line("| | a |"));
        assert!(!is_table_line("no pipes here"));
    }

    #[test]
    fn test_unpiped_edges() {
        let table = extract_table("A|B|C\n-|-|-\n1|2|3").unwrap();
        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert_eq!(table.rows, vec![vec![num(1.0), num(2.0), num(3.0)]]);
    }

    #[test]
    fn test_piped_edges_and_surrounding_prose() {
        let reply = "Here is the breakdown:\n\n\
                    | Post Type | Likes | Shares |\n\
                    |-----------|-------|--------|\n\
                    | Photo | 120 | 30 |\n\
                    | Video | 300 | 90 |\n\n\
                    Videos clearly win.";
        let table = extract_table(reply).unwrap();
        assert_eq!(table.headers, vec!["Post Type", "Likes", "Shares"]);
        assert_eq!(
            table.rows,
            vec![
                vec![text("Photo"), num(120.0), num(30.0)],
                vec![text("Video"), num(300.0), num(90.0)],
            ]
        );
    }

    #[test]
    fn test_text_cells_stay_text() {
        let table = extract_table("|k|v|\n|-|-|\n|abc|1,200|").unwrap();
        assert_eq!(table.rows[0], vec![text("abc"), text("1,200")]);
    }

    #[test]
    fn test_numeric_coercion_forms() {
        assert_eq!(Cell::parse(" 42 "), num(42.0));
        assert_eq!(Cell::parse("-3.5"), num(-3.5));
        assert_eq!(Cell::parse("1e3"), num(1000.0));
        assert_eq!(Cell::parse(""), text(""));
        assert_eq!(Cell::parse("NaN"), text("NaN"));
        assert_eq!(Cell::parse("inf"), text("inf"));
        assert_eq!(Cell::parse("12%"), text("12%"));
    }

    #[test]
    fn test_second_line_always_skipped() {
        // No separator row: the first data line is consumed as the separator
        let table = extract_table("|a|b|\n|1|2|\n|3|4|").unwrap();
        assert_eq!(table.rows, vec![vec![num(3.0), num(4.0)]]);
    }

    #[test]
    fn test_header_and_separator_only() {
        let table = extract_table("|a|b|\n|-|-|").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert!(table.rows.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_ragged_rows_pass_through() {
        let table = extract_table("|a|b|c|\n|-|-|-|\n|x|1|\n|y|1|2|3|").unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn test_interior_empty_cells_kept() {
        let table = extract_table("|a||c|\n|-|-|-|\n|1||3|").unwrap();
        assert_eq!(table.headers, vec!["a", "", "c"]);
        assert_eq!(table.rows[0], vec![num(1.0), text(""), num(3.0)]);
    }

    #[test]
    fn test_crlf_input() {
        let table = extract_table("|a|b|\r\n|-|-|\r\n|1|2|\r\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec![num(1.0), num(2.0)]]);
    }

    #[test]
    fn test_wire_shape() {
        let table = extract_table("|a|b|\n|-|-|\n|x|2|").unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "headers": ["a", "b"], "rows": [["x", 2.0]] })
        );

        // Accepts the legacy `data` key as well
        let legacy: ParsedTable =
            serde_json::from_str(r#"{"headers":["a"],"data":[["x",2]]}"#).unwrap();
        assert_eq!(legacy.rows, vec![vec![text("x"), num(2.0)]]);
    }
}
