use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use pdftab::export::{export_csv_dir, render_markdown, write_csv_stream, write_json};
use pdftab::ExtractedTable;

use crate::OutputFormat;

/// Print or save extracted tables. Status lines go to stderr so stdout
/// carries only table data.
pub fn output_tables(
    tables: &[ExtractedTable],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    if tables.is_empty() {
        eprintln!("No tables detected.");
        return Ok(());
    }

    match (format, output) {
        (OutputFormat::Csv, Some(dir)) => {
            let paths = export_csv_dir(tables, dir)
                .with_context(|| format!("failed to write CSV files to {}", dir.display()))?;
            for path in &paths {
                eprintln!("💾 Saved {}", path.display());
            }
        }
        (OutputFormat::Csv, None) => {
            write_csv_stream(tables, io::stdout().lock())?;
        }
        (OutputFormat::Json, Some(path)) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_json(tables, &mut writer)?;
            writer.flush()?;
            eprintln!("💾 Saved {} tables to {}", tables.len(), path.display());
        }
        (OutputFormat::Json, None) => {
            write_json(tables, io::stdout().lock())?;
        }
        (OutputFormat::Markdown, Some(path)) => {
            let md = render_markdown(tables);
            std::fs::write(path, &md)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("💾 Saved {} tables to {}", tables.len(), path.display());
        }
        (OutputFormat::Markdown, None) => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(render_markdown(tables).as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
