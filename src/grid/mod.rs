//! Borderless table reconstruction from positioned words.
//!
//! Used when no ruled table can be found on a page. The algorithm:
//!
//! 1. Snap each word's `top` to the nearest multiple of the row tolerance
//!    and group words sharing a snapped value into rows ([`cluster_rows`])
//! 2. Sort each row left to right
//! 3. Walk each row and start a new cell wherever the gap since the previous
//!    word's right edge exceeds the column tolerance ([`assemble_cells`])
//!
//! The result is a ragged grid: rows keep whatever number of cells they
//! produced and are never padded here.
//!
//! # Example
//!
//! ```rust
//! use pdftab::{reconstruct, GridConfig, Token};
//!
//! let words = vec![
//!     Token::new("Name", 0.0, 30.0, 100.0)?,
//!     Token::new("Age", 50.0, 70.0, 100.0)?,
//!     Token::new("Alice", 0.0, 35.0, 120.0)?,
//!     Token::new("30", 50.0, 60.0, 120.0)?,
//! ];
//! let table = reconstruct(&words, &GridConfig::default())?;
//! assert_eq!(table.rows, vec![vec!["Name", "Age"], vec!["Alice", "30"]]);
//! # Ok::<(), pdftab::TableError>(())
//! ```

pub mod cells;
pub mod rows;
pub mod types;

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::error::Result;

pub use cells::{assemble_cells, build_table};
pub use rows::{cluster_rows, Row};
pub use types::Token;

/// A ragged grid of cell strings: `rows[row_idx][col_idx]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// True when the table has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when at least one row holds at least one non-blank cell.
    ///
    /// Ruled-table detectors frequently report grids made only of empty
    /// cells; those do not suppress borderless reconstruction.
    pub fn is_usable(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.iter().any(|cell| !cell.trim().is_empty()))
    }

    /// Render as a GitHub-flavored markdown table.
    ///
    /// The first row is used as the header. Short rows are padded with
    /// empty cells up to [`Table::column_count`] in the rendered output only.
    pub fn to_markdown(&self) -> String {
        let col_count = self.column_count();
        if col_count == 0 {
            return String::new();
        }

        let mut md = String::new();
        let mut push_row = |row: &[String]| {
            md.push('|');
            for col in 0..col_count {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                md.push_str(&format!(" {} |", escape_cell(cell)));
            }
            md.push('\n');
        };

        push_row(&self.rows[0]);
        let separator = vec!["---".to_string(); col_count];
        push_row(&separator);
        for row in self.rows.iter().skip(1) {
            push_row(row);
        }

        md
    }
}

/// Keep a cell on one markdown line: pipes are escaped and line breaks
/// become spaces.
fn escape_cell(cell: &str) -> String {
    cell.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}

/// Reconstruct one page's table from its words.
///
/// Returns an empty [`Table`] when the page has no words; that signals
/// "no table" and is not an error.
pub fn reconstruct(tokens: &[Token], config: &GridConfig) -> Result<Table> {
    config.validate()?;
    let rows = cluster_rows(tokens, config.row_tolerance)?;
    Ok(build_table(&rows, config.col_tolerance))
}
