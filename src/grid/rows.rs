//! Row clustering by rounded vertical position.
//!
//! Each token's `top` is snapped to the nearest multiple of the row
//! tolerance (half away from zero). Tokens that snap to the same value form
//! one row. Rows are emitted top to bottom and sorted left to right inside.
//!
//! Complexity: O(n log n) in the number of tokens.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::{Result, TableError};

use super::types::Token;

/// Tokens that share a visual line, sorted by `x0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    /// Snapped vertical position shared by every token in the row.
    pub y_key: f64,
    pub tokens: Vec<&'a Token>,
}

impl Row<'_> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Group tokens into rows by snapping `top` to multiples of `tolerance`.
///
/// An empty token slice yields an empty row list. Tokens with equal `x0`
/// keep their input order.
pub fn cluster_rows(tokens: &[Token], tolerance: f64) -> Result<Vec<Row<'_>>> {
    check_tolerance(tolerance)?;

    // Keyed by bucket index rather than the snapped float so ordering is total.
    let mut buckets: BTreeMap<i64, Vec<&Token>> = BTreeMap::new();
    for token in tokens {
        buckets
            .entry(bucket_index(token.top(), tolerance))
            .or_default()
            .push(token);
    }

    let rows = buckets
        .into_iter()
        .map(|(index, mut row_tokens)| {
            // `sort_by` is stable, which keeps ties in input order. Coordinates
            // are finite, and -0.0 must tie with 0.0.
            row_tokens.sort_by(|a, b| a.x0().partial_cmp(&b.x0()).unwrap_or(Ordering::Equal));
            Row {
                y_key: index as f64 * tolerance,
                tokens: row_tokens,
            }
        })
        .collect();

    Ok(rows)
}

/// Nearest multiple of `tolerance` to `top`, expressed as a multiplier.
fn bucket_index(top: f64, tolerance: f64) -> i64 {
    // f64::round rounds half away from zero.
    (top / tolerance).round() as i64
}

fn check_tolerance(tolerance: f64) -> Result<()> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(TableError::InvalidInput(format!(
            "row tolerance must be a positive finite number, got {tolerance}"
        )))
    }
}
