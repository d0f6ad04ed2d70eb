//! Core types for board configurations

/// Column index of the queen placed in a given row.
pub type Column = u32;

/// A board configuration: position `i` holds the column of the queen in row `i`.
///
/// Only a prefix is meaningful while a search is in progress; the remaining
/// entries are placeholders.
pub type Board = Vec<Column>;

/// Render a board (or a prefix of one) as a grid, one row per line.
///
/// `Q` marks a queen, `.` an empty square. The grid is `n` columns wide where
/// `n` is the length of the slice.
pub fn format_board(board: &[Column]) -> String {
    let n = board.len();
    let mut out = String::with_capacity(n * (2 * n + 1));
    for &col in board {
        for c in 0..n {
            if c > 0 {
                out.push(' ');
            }
            out.push(if c as Column == col { 'Q' } else { '.' });
        }
        out.push('\n');
    }
    out
}
