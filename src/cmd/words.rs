use std::path::Path;

use anyhow::{bail, Context, Result};

use pdftab::{extract_tables, ExtractConfig, WordDump};

use crate::OutputFormat;
use super::output::output_tables;

pub fn cmd_words(
    input: &Path,
    config: &ExtractConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let from_stdin = input.as_os_str() == "-";
    if !from_stdin && !input.exists() {
        bail!("File {} does not exist.", input.display());
    }

    let source = if from_stdin {
        "stdin".to_string()
    } else {
        input.display().to_string()
    };
    eprintln!("📄 Processing word dump: {source}");

    let dump = WordDump::load(input).with_context(|| format!("failed to read {source}"))?;
    let tables = extract_tables(&dump, config)?;
    output_tables(&tables, format, output)
}
