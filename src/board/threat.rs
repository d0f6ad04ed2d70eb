//! Non-attack checks between queens.
//!
//! Rows are implicit (a queen's row is its index in the board), so two queens
//! never share a row. Only columns and diagonals have to be checked.

use crate::board::types::Column;

/// Do the queens at `(row_a, col_a)` and `(row_b, col_b)` attack each other?
pub fn threatens(row_a: usize, col_a: Column, row_b: usize, col_b: Column) -> bool {
    col_a == col_b || row_a.abs_diff(row_b) == col_a.abs_diff(col_b) as usize
}

/// Can a queen be placed in column `col` of row `prefix.len()` without
/// attacking any queen already in `prefix`?
pub fn is_safe(prefix: &[Column], col: Column) -> bool {
    let row = prefix.len();
    prefix
        .iter()
        .enumerate()
        .all(|(r, &c)| !threatens(r, c, row, col))
}

/// Is `prefix` a valid partial configuration (no two queens attack each other)?
pub fn is_valid_prefix(prefix: &[Column]) -> bool {
    (0..prefix.len()).all(|row| is_safe(&prefix[..row], prefix[row]))
}
