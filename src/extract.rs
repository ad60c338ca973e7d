//! Document-level table extraction.
//!
//! For each page, usable ruled tables from the [`PageSource`] win; otherwise
//! the page's words go through borderless reconstruction. A page that
//! yields nothing is logged and skipped, never treated as a failure.
//!
//! Decoding is sequential (sources own non-thread-safe handles). The
//! geometric stage is pure, so it fans out across the rayon pool; results
//! are collected by page index and keep document order regardless of which
//! page finishes first.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ExtractConfig, GridConfig};
use crate::error::Result;
use crate::grid::{reconstruct, Table, Token};
use crate::source::PageSource;

/// How a table was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableOrigin {
    /// Reported by the source's ruled-table detector.
    Bordered,
    /// Rebuilt from word positions.
    Borderless,
}

/// A table together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedTable {
    /// Page number (1-based).
    pub page: usize,
    pub origin: TableOrigin,
    pub table: Table,
}

/// Work collected for one page during the sequential decode pass.
enum PageInput {
    Bordered(Vec<Table>),
    Words(Vec<Token>),
}

/// Extract tables from every page of `source`, in page order.
pub fn extract_tables(
    source: &dyn PageSource,
    config: &ExtractConfig,
) -> Result<Vec<ExtractedTable>> {
    config.validate()?;
    let start = Instant::now();

    let page_count = source.page_count();
    let mut inputs = Vec::with_capacity(page_count);
    for page in 0..page_count {
        inputs.push(load_page(source, page, config.try_bordered)?);
    }

    let grid = config.grid;
    let per_page: Vec<Result<Vec<ExtractedTable>>> = if config.parallel {
        inputs
            .into_par_iter()
            .enumerate()
            .map(|(idx, input)| process_page(idx + 1, input, &grid))
            .collect()
    } else {
        inputs
            .into_iter()
            .enumerate()
            .map(|(idx, input)| process_page(idx + 1, input, &grid))
            .collect()
    };

    let mut tables = Vec::new();
    for page_tables in per_page {
        tables.extend(page_tables?);
    }

    info!(
        "Extracted {} tables from {} pages in {:.2}ms",
        tables.len(),
        page_count,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(tables)
}

/// Fetch the ruled tables for a page, and its words only when none are usable.
fn load_page(source: &dyn PageSource, page: usize, try_bordered: bool) -> Result<PageInput> {
    if try_bordered {
        let candidates = source.bordered_tables(page)?;
        let found = candidates.len();
        let usable: Vec<Table> = candidates.into_iter().filter(Table::is_usable).collect();
        if !usable.is_empty() {
            debug!("Page {}: {} of {} ruled tables usable", page + 1, usable.len(), found);
            return Ok(PageInput::Bordered(usable));
        }
        if found > 0 {
            debug!("Page {}: {} ruled tables, all empty; using word geometry", page + 1, found);
        }
    }
    Ok(PageInput::Words(source.words(page)?))
}

fn process_page(page: usize, input: PageInput, grid: &GridConfig) -> Result<Vec<ExtractedTable>> {
    match input {
        PageInput::Bordered(tables) => Ok(tables
            .into_iter()
            .map(|table| ExtractedTable {
                page,
                origin: TableOrigin::Bordered,
                table,
            })
            .collect()),
        PageInput::Words(tokens) => {
            let table = reconstruct(&tokens, grid)?;
            if table.is_empty() {
                info!("No table detected on page {page}.");
                return Ok(Vec::new());
            }
            debug!(
                "Page {page}: {} words -> {} rows, up to {} columns",
                tokens.len(),
                table.row_count(),
                table.column_count()
            );
            Ok(vec![ExtractedTable {
                page,
                origin: TableOrigin::Borderless,
                table,
            }])
        }
    }
}
