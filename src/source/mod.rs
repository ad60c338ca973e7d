//! Page sources: where words and ruled tables come from.
//!
//! The reconstruction core only needs two things per page, both provided by
//! a [`PageSource`]:
//!
//! | Source | Words | Ruled tables | Feature Flag |
//! |--------|-------|--------------|-------------|
//! | [`WordDump`] (JSON) | from file | from file | always |
//! | [`pdf::PdfSource`] | pdfium glyphs | none | `pdf` |

#[cfg(feature = "pdf")]
pub mod pdf;

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TableError};
use crate::grid::{Table, Token};

/// Supplies decoded pages to the extractor.
///
/// Pages are addressed by 0-based index. Implementations do their own I/O;
/// the extractor calls them sequentially before any parallel work starts.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Positioned words on a page, in any order.
    fn words(&self, page: usize) -> Result<Vec<Token>>;

    /// Tables found by a ruled-table detector, tried before word geometry.
    fn bordered_tables(&self, _page: usize) -> Result<Vec<Table>> {
        Ok(Vec::new())
    }
}

/// One page of a [`WordDump`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpPage {
    #[serde(default)]
    pub words: Vec<Token>,
    #[serde(default, deserialize_with = "nullable_tables")]
    pub bordered_tables: Vec<Table>,
}

/// Ruled-table detectors emit `null` for cells they found no text in; those
/// read as empty strings so [`Table::is_usable`] can judge the grid.
fn nullable_tables<'de, D>(deserializer: D) -> std::result::Result<Vec<Table>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Vec<Vec<Option<String>>>> = Deserialize::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|rows| {
            Table::new(
                rows.into_iter()
                    .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
                    .collect(),
            )
        })
        .collect())
}

/// Pages exported by an upstream decoder as JSON.
///
/// ```json
/// { "pages": [ { "words": [ {"text": "Name", "x0": 0, "x1": 30, "top": 100} ],
///                "bordered_tables": [] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordDump {
    pub pages: Vec<DumpPage>,
}

impl WordDump {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).map_err(classify_json_error)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(classify_json_error)
    }

    /// Read a dump from `path`, or from stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        if path.as_os_str() == "-" {
            return Self::from_reader(std::io::stdin().lock());
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

/// Well-formed JSON with the wrong shape (including a malformed token) is a
/// caller contract violation; anything else is a plain JSON error.
fn classify_json_error(err: serde_json::Error) -> TableError {
    if err.is_data() {
        TableError::InvalidInput(err.to_string())
    } else {
        TableError::Json(err)
    }
}

impl PageSource for WordDump {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn words(&self, page: usize) -> Result<Vec<Token>> {
        self.pages
            .get(page)
            .map(|p| p.words.clone())
            .ok_or_else(|| out_of_range(page, self.pages.len()))
    }

    fn bordered_tables(&self, page: usize) -> Result<Vec<Table>> {
        self.pages
            .get(page)
            .map(|p| p.bordered_tables.clone())
            .ok_or_else(|| out_of_range(page, self.pages.len()))
    }
}

fn out_of_range(page: usize, count: usize) -> TableError {
    TableError::InvalidInput(format!("page {page} out of range (document has {count})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "pages": [
            {
                "words": [
                    {"text": "Name", "x0": 0, "x1": 30, "top": 100},
                    {"text": "Age", "x0": 50, "x1": 70, "top": 100}
                ]
            },
            {
                "bordered_tables": [[["Qty", "Item"], ["2", "Bolt"]]]
            }
        ]
    }"#;

    #[test]
    fn parses_pages_words_and_tables() {
        let dump = WordDump::from_json_str(DUMP).unwrap();
        assert_eq!(dump.page_count(), 2);
        assert_eq!(dump.words(0).unwrap().len(), 2);
        assert!(dump.bordered_tables(0).unwrap().is_empty());
        assert!(dump.words(1).unwrap().is_empty());
        let tables = dump.bordered_tables(1).unwrap();
        assert_eq!(tables[0].rows, vec![vec!["Qty", "Item"], vec!["2", "Bolt"]]);
    }

    #[test]
    fn null_ruled_cells_read_as_empty() {
        let json = r#"{"pages": [{"bordered_tables": [[["Qty", null], [null, "Bolt"]]]}]}"#;
        let dump = WordDump::from_json_str(json).unwrap();
        let tables = dump.bordered_tables(0).unwrap();
        assert_eq!(tables[0].rows, vec![vec!["Qty", ""], vec!["", "Bolt"]]);
        assert!(tables[0].is_usable());
    }

    #[test]
    fn all_null_ruled_table_is_not_usable() {
        let json = r#"{"pages": [{"bordered_tables": [[[null, null], [null]]]}]}"#;
        let dump = WordDump::from_json_str(json).unwrap();
        let tables = dump.bordered_tables(0).unwrap();
        assert_eq!(tables[0].rows, vec![vec!["", ""], vec![""]]);
        assert!(!tables[0].is_usable());
    }

    #[test]
    fn coordinates_keep_json_precision() {
        let json = r#"{"pages": [{"words": [
            {"text": "a", "x0": 0, "x1": 1, "top": 100.49999999}
        ]}]}"#;
        let dump = WordDump::from_json_str(json).unwrap();
        assert_eq!(dump.words(0).unwrap()[0].top(), 100.499_999_99);
    }

    #[test]
    fn missing_token_field_is_invalid_input() {
        let json = r#"{"pages": [{"words": [{"text": "x", "x0": 0, "top": 1}]}]}"#;
        match WordDump::from_json_str(json) {
            Err(TableError::InvalidInput(msg)) => assert!(msg.contains("`x1`"), "{msg}"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn blank_token_text_is_invalid_input() {
        let json = r#"{"pages": [{"words": [{"text": " ", "x0": 0, "x1": 1, "top": 1}]}]}"#;
        assert!(matches!(
            WordDump::from_json_str(json),
            Err(TableError::InvalidInput(_))
        ));
    }

    #[test]
    fn syntax_error_is_json_error() {
        assert!(matches!(
            WordDump::from_json_str("{\"pages\": ["),
            Err(TableError::Json(_))
        ));
    }

    #[test]
    fn out_of_range_page_is_rejected() {
        let dump = WordDump::default();
        assert!(matches!(dump.words(3), Err(TableError::InvalidInput(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("pdftab-missing-dump.json");
        assert!(matches!(WordDump::load(&path), Err(TableError::Io(_))));
    }
}
