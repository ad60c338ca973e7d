//! Cell assembly from a left-to-right sorted row.
//!
//! A horizontal gap wider than the column tolerance between one token's
//! right edge and the next token's left edge starts a new cell. Anything
//! closer is joined into the current cell with a single space.

use super::rows::Row;
use super::Table;

/// Merge a row's tokens into cell strings.
///
/// The trailing accumulator is always flushed, so a row with tokens never
/// loses its last cell. An empty row yields no cells.
pub fn assemble_cells(row: &Row<'_>, tolerance: f64) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut last_right: Option<f64> = None;

    for token in &row.tokens {
        let starts_cell = last_right.map_or(true, |right| token.x0() - right > tolerance);
        if starts_cell {
            flush(&mut cells, &mut current);
        }
        current.push_str(token.text());
        current.push(' ');
        last_right = Some(token.x1());
    }
    flush(&mut cells, &mut current);

    cells
}

/// Run every row through [`assemble_cells`], preserving row order.
pub fn build_table(rows: &[Row<'_>], tolerance: f64) -> Table {
    Table::new(
        rows.iter()
            .map(|row| assemble_cells(row, tolerance))
            .collect(),
    )
}

fn flush(cells: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        cells.push(current.trim_end().to_string());
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::types::Token;

    fn row(tokens: &[Token]) -> Row<'_> {
        Row {
            y_key: 0.0,
            tokens: tokens.iter().collect(),
        }
    }

    fn token(text: &str, x0: f64, x1: f64) -> Token {
        Token::new(text, x0, x1, 0.0).unwrap()
    }

    #[test]
    fn empty_row_yields_no_cells() {
        assert!(assemble_cells(&row(&[]), 10.0).is_empty());
    }

    #[test]
    fn single_token_has_no_trailing_space() {
        let tokens = vec![token("Total", 5.0, 30.0)];
        assert_eq!(assemble_cells(&row(&tokens), 10.0), vec!["Total"]);
    }

    #[test]
    fn close_tokens_merge_into_one_cell() {
        let tokens = vec![token("word1", 0.0, 20.0), token("word2", 25.0, 40.0)];
        assert_eq!(assemble_cells(&row(&tokens), 10.0), vec!["word1 word2"]);
    }

    #[test]
    fn wide_gap_splits_cells() {
        let tokens = vec![token("Name", 0.0, 30.0), token("Age", 50.0, 70.0)];
        assert_eq!(assemble_cells(&row(&tokens), 10.0), vec!["Name", "Age"]);
    }

    #[test]
    fn gap_equal_to_tolerance_stays_in_cell() {
        let tokens = vec![token("a", 0.0, 10.0), token("b", 20.0, 25.0)];
        assert_eq!(assemble_cells(&row(&tokens), 10.0), vec!["a b"]);
    }

    #[test]
    fn overlapping_tokens_merge() {
        let tokens = vec![token("foo", 0.0, 20.0), token("bar", 15.0, 30.0)];
        assert_eq!(assemble_cells(&row(&tokens), 10.0), vec!["foo bar"]);
    }

    #[test]
    fn last_cell_is_flushed_after_split() {
        let tokens = vec![
            token("Unit", 0.0, 20.0),
            token("price", 22.0, 45.0),
            token("12.50", 100.0, 130.0),
            token("EUR", 133.0, 150.0),
        ];
        assert_eq!(
            assemble_cells(&row(&tokens), 10.0),
            vec!["Unit price", "12.50 EUR"]
        );
    }

    #[test]
    fn gap_is_measured_from_last_right_edge() {
        // The middle token reaches far right, so the third token is close to it.
        let tokens = vec![
            token("a", 0.0, 5.0),
            token("wide", 8.0, 90.0),
            token("b", 95.0, 100.0),
        ];
        assert_eq!(assemble_cells(&row(&tokens), 10.0), vec!["a wide b"]);
    }

    #[test]
    fn column_tolerance_is_tunable() {
        let tokens = vec![token("a", 0.0, 10.0), token("b", 25.0, 30.0)];
        assert_eq!(assemble_cells(&row(&tokens), 10.0), vec!["a", "b"]);
        assert_eq!(assemble_cells(&row(&tokens), 20.0), vec!["a b"]);
    }

    #[test]
    fn signed_zero_edges_share_a_cell() {
        let tokens = vec![token("a", 0.0, 0.0), token("b", -0.0, 0.0)];
        let rows = crate::grid::cluster_rows(&tokens, 3.0).unwrap();
        assert_eq!(build_table(&rows, 10.0).rows, vec![vec!["a b"]]);
    }

    #[test]
    fn build_table_keeps_row_order_and_raggedness() {
        let header = vec![
            token("A", 0.0, 10.0),
            token("B", 50.0, 60.0),
            token("C", 100.0, 110.0),
        ];
        let body = vec![token("1", 0.0, 5.0)];
        let rows = vec![row(&header), row(&body), row(&[])];
        let table = build_table(&rows, 10.0);
        assert_eq!(
            table.rows,
            vec![vec!["A", "B", "C"], vec!["1"], Vec::<&str>::new()]
        );
    }
}
