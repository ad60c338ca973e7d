//! `pdftab` - Borderless table recovery from positioned words
//!
//! # Features
//!
//! - **Row clustering**: words snapped to a vertical grid share a row
//! - **Cell assembly**: horizontal gaps wider than a tolerance split cells
//! - **Ruled tables first**: a page source's own detector wins when it finds anything
//! - **Parallel pages**: reconstruction runs on the rayon pool, output stays in page order
//! - **Export**: markdown, JSON and CSV
//!
//! # Example
//!
//! ```rust
//! use pdftab::{extract_tables, ExtractConfig, WordDump};
//!
//! let dump = WordDump::from_json_str(r#"{"pages": [{"words": [
//!     {"text": "Name", "x0": 0, "x1": 30, "top": 100},
//!     {"text": "Age", "x0": 50, "x1": 70, "top": 100}
//! ]}]}"#)?;
//! let tables = extract_tables(&dump, &ExtractConfig::default())?;
//! assert_eq!(tables[0].table.rows, vec![vec!["Name", "Age"]]);
//! # Ok::<(), pdftab::TableError>(())
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod grid;
pub mod source;

pub use config::{load_config, load_config_from, ExtractConfig, GridConfig};
pub use error::{Result, TableError};
pub use extract::{extract_tables, ExtractedTable, TableOrigin};
pub use grid::{assemble_cells, build_table, cluster_rows, reconstruct, Row, Table, Token};
#[cfg(feature = "pdf")]
pub use source::pdf::PdfSource;
pub use source::{DumpPage, PageSource, WordDump};

/// Version of pdftab
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
