//! Writers for extracted tables.
//!
//! Each table is labelled `Table_<n>` (1-based, document order), which is
//! also the file stem used when CSV tables are written to a directory.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::debug;

use crate::error::Result;
use crate::extract::{ExtractedTable, TableOrigin};
use crate::grid::Table;

/// Label for the `index`-th (0-based) extracted table.
pub fn table_label(index: usize) -> String {
    format!("Table_{}", index + 1)
}

/// Render all tables as markdown sections.
pub fn render_markdown(tables: &[ExtractedTable]) -> String {
    let mut md = String::new();
    for (idx, extracted) in tables.iter().enumerate() {
        let origin = match extracted.origin {
            TableOrigin::Bordered => "ruled",
            TableOrigin::Borderless => "borderless",
        };
        if idx > 0 {
            md.push('\n');
        }
        let _ = writeln!(
            md,
            "## {} (page {}, {origin})\n",
            table_label(idx),
            extracted.page
        );
        md.push_str(&extracted.table.to_markdown());
    }
    md
}

/// Write all tables as a pretty-printed JSON array.
pub fn write_json<W: Write>(tables: &[ExtractedTable], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, tables)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write one table as CSV. Ragged rows are written as-is.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);
    for row in &table.rows {
        // A zero-field record would be dropped by the writer; keep the line.
        if row.is_empty() {
            csv_writer.write_record([""])?;
        } else {
            csv_writer.write_record(row)?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write every table as CSV blocks separated by a blank line.
pub fn write_csv_stream<W: Write>(tables: &[ExtractedTable], mut writer: W) -> Result<()> {
    for (idx, extracted) in tables.iter().enumerate() {
        if idx > 0 {
            writer.write_all(b"\n")?;
        }
        write_csv(&extracted.table, &mut writer)?;
    }
    Ok(())
}

/// Write each table to `<dir>/Table_<n>.csv`, creating `dir` if needed.
///
/// Returns the written paths in table order.
pub fn export_csv_dir(tables: &[ExtractedTable], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(tables.len());
    for (idx, extracted) in tables.iter().enumerate() {
        let path = dir.join(format!("{}.csv", table_label(idx)));
        let file = fs::File::create(&path)?;
        write_csv(&extracted.table, std::io::BufWriter::new(file))?;
        debug!("Wrote {} rows to {}", extracted.table.row_count(), path.display());
        paths.push(path);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(page: usize, origin: TableOrigin, rows: Vec<Vec<&str>>) -> ExtractedTable {
        ExtractedTable {
            page,
            origin,
            table: Table::new(
                rows.into_iter()
                    .map(|r| r.into_iter().map(String::from).collect())
                    .collect(),
            ),
        }
    }

    fn sample() -> Vec<ExtractedTable> {
        vec![
            extracted(
                1,
                TableOrigin::Borderless,
                vec![vec!["Name", "Age"], vec!["Alice", "30"]],
            ),
            extracted(3, TableOrigin::Bordered, vec![vec!["Qty"], vec!["2", "Bolt, M4"]]),
        ]
    }

    #[test]
    fn labels_are_one_based() {
        assert_eq!(table_label(0), "Table_1");
        assert_eq!(table_label(9), "Table_10");
    }

    #[test]
    fn markdown_has_a_section_per_table() {
        let md = render_markdown(&sample());
        assert!(md.starts_with("## Table_1 (page 1, borderless)\n\n| Name | Age |"));
        assert!(md.contains("## Table_2 (page 3, ruled)"));
        assert!(md.contains("| 2 | Bolt, M4 |"));
    }

    #[test]
    fn markdown_of_nothing_is_empty() {
        assert_eq!(render_markdown(&[]), "");
    }

    #[test]
    fn csv_keeps_ragged_rows_and_quotes() {
        let mut out = Vec::new();
        write_csv(&sample()[1].table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Qty\n2,\"Bolt, M4\"\n");
    }

    #[test]
    fn csv_keeps_empty_rows() {
        let table = Table::new(vec![vec!["a".into()], vec![], vec!["b".into()]]);
        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\n\"\"\nb\n");
    }

    #[test]
    fn csv_stream_separates_tables() {
        let mut out = Vec::new();
        write_csv_stream(&sample(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Name,Age\nAlice,30\n\nQty\n2,\"Bolt, M4\"\n"
        );
    }

    #[test]
    fn json_lists_page_and_origin() {
        let mut out = Vec::new();
        write_json(&sample(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["page"], 1);
        assert_eq!(value[1]["origin"], "bordered");
        assert_eq!(value[0]["table"][1][0], "Alice");
    }

    #[test]
    fn csv_dir_writes_one_file_per_table() {
        let dir = std::env::temp_dir().join(format!("pdftab-export-{}", std::process::id()));
        let paths = export_csv_dir(&sample(), &dir).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("Table_1.csv"));
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "Name,Age\nAlice,30\n");
        fs::remove_dir_all(&dir).unwrap();
    }
}
