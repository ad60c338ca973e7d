use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};

use pdftab::{extract_tables, ExtractConfig, PageSource, PdfSource};

use crate::OutputFormat;
use super::output::output_tables;

pub fn cmd_extract(
    pdf: &Path,
    config: &ExtractConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    if !pdf.exists() {
        bail!("File {} does not exist.", pdf.display());
    }

    eprintln!("📄 Processing PDF: {}", pdf.display());
    let start = Instant::now();
    let source =
        PdfSource::open(pdf).with_context(|| format!("failed to decode {}", pdf.display()))?;
    let tables = extract_tables(&source, config)?;
    eprintln!(
        "📊 {} tables from {} pages in {:.2}ms",
        tables.len(),
        source.page_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    output_tables(&tables, format, output)
}
