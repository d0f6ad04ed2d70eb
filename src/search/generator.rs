//! Level-by-level backtracking generator for queen placements
//!
//! Given a board whose rows `[0, start_level)` already hold a valid prefix,
//! the generator enumerates every way to fill rows `[start_level, max_level)`
//! so that no two queens attack each other. The search is depth-first and
//! tries columns `0..n` in increasing order at every row, so for a fixed
//! prefix the solutions always come out in the same (lexicographic) order.
//!
//! Two entry points share one engine:
//! - [`LevelSearch`] is the pull form: call `next_solution` until it returns
//!   `None`. The coordinator uses this so that dispatch errors propagate with `?`.
//! - [`generate`] is the push form: a callback is invoked once per solution.

use crate::board::{Column, is_safe};
use crate::error::SolverError;

/// Resumable backtracking search over rows `[start_level, max_level)`.
///
/// Holds its own copy of the board, so the caller's board is never touched.
#[derive(Debug, Clone)]
pub struct LevelSearch {
    board: Vec<Column>,
    /// Next column to try, per row. Only `[start_level, max_level)` is used.
    candidates: Vec<Column>,
    start_level: usize,
    max_level: usize,
    /// Row currently being filled.
    level: usize,
    exhausted: bool,
}

impl LevelSearch {
    /// Set up a search extending `pos[0..start_level)` up to `max_level` rows.
    ///
    /// The prefix is trusted, not re-validated.
    pub fn new(pos: &[Column], start_level: usize, max_level: usize) -> Result<Self, SolverError> {
        let n = pos.len();
        if n == 0 {
            return Err(SolverError::invalid_parameters("board size must be at least 1"));
        }
        if start_level > max_level {
            return Err(SolverError::invalid_parameters(format!(
                "start level {} is past max level {}",
                start_level, max_level
            )));
        }
        if max_level > n {
            return Err(SolverError::invalid_parameters(format!(
                "max level {} exceeds board size {}",
                max_level, n
            )));
        }

        Ok(Self {
            board: pos.to_vec(),
            candidates: vec![0; n],
            start_level,
            max_level,
            level: start_level,
            exhausted: false,
        })
    }

    /// Board size `n`.
    #[cfg(test)]
    pub fn size(&self) -> usize {
        self.board.len()
    }

    /// Advance to the next placement of rows `[0, max_level)`.
    ///
    /// Returns `None` once every candidate of row `start_level` has been tried.
    /// A zero-width range yields the existing prefix exactly once.
    pub fn next_solution(&mut self) -> Option<&[Column]> {
        if self.exhausted {
            return None;
        }
        if self.start_level == self.max_level {
            self.exhausted = true;
            return Some(&self.board[..self.max_level]);
        }

        let n = self.board.len() as Column;
        loop {
            let col = self.candidates[self.level];
            if col >= n {
                // Row exhausted: backtrack, or stop if this was the first row.
                if self.level == self.start_level {
                    self.exhausted = true;
                    return None;
                }
                self.level -= 1;
                self.candidates[self.level] += 1;
                continue;
            }

            if !is_safe(&self.board[..self.level], col) {
                self.candidates[self.level] += 1;
                continue;
            }

            self.board[self.level] = col;
            if self.level + 1 == self.max_level {
                // Move past this column now so the next call resumes the search.
                self.candidates[self.level] += 1;
                return Some(&self.board[..self.max_level]);
            }
            self.level += 1;
            self.candidates[self.level] = 0;
        }
    }
}

/// Run the search over `[start_level, max_level)` and invoke `on_solution`
/// with rows `[0, max_level)` for every valid placement found.
pub fn generate<F>(
    pos: &[Column],
    start_level: usize,
    max_level: usize,
    mut on_solution: F,
) -> Result<(), SolverError>
where
    F: FnMut(&[Column]),
{
    let mut search = LevelSearch::new(pos, start_level, max_level)?;
    while let Some(solution) = search.next_solution() {
        on_solution(solution);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::is_valid_prefix;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn collect(pos: &[Column], start: usize, max: usize) -> Vec<Vec<Column>> {
        let mut found = Vec::new();
        generate(pos, start, max, |s| found.push(s.to_vec())).unwrap();
        found
    }

    #[test]
    fn test_four_queens_in_order() {
        let found = collect(&[0; 4], 0, 4);
        assert_eq!(found, vec![vec![1, 3, 0, 2], vec![2, 0, 3, 1]]);
    }

    #[test]
    fn test_known_solution_counts() {
        // OEIS A000170
        let expected = [1, 0, 0, 2, 10, 4, 40, 92];
        for (i, &count) in expected.iter().enumerate() {
            let n = i + 1;
            assert_eq!(collect(&vec![0; n], 0, n).len(), count, "n = {}", n);
        }
    }

    #[test]
    fn test_partial_depth() {
        // All valid two-row prefixes of a 4x4 board.
        let found = collect(&[0; 4], 0, 2);
        assert_eq!(
            found,
            vec![
                vec![0, 2],
                vec![0, 3],
                vec![1, 3],
                vec![2, 0],
                vec![3, 0],
                vec![3, 1],
            ]
        );
    }

    #[test]
    fn test_single_queen() {
        assert_eq!(collect(&[0], 0, 1), vec![vec![0]]);
    }

    #[test]
    fn test_zero_width_range_yields_prefix_once() {
        assert_eq!(collect(&[1, 3, 0, 2], 4, 4), vec![vec![1, 3, 0, 2]]);
        assert_eq!(collect(&[1, 3, 0, 0], 2, 2), vec![vec![1, 3]]);
        assert_eq!(collect(&[0; 4], 0, 0), vec![Vec::<Column>::new()]);
    }

    #[test]
    fn test_zero_width_range_does_not_validate() {
        // The prefix is trusted; an invalid full board is still echoed back.
        assert_eq!(collect(&[0, 0], 2, 2), vec![vec![0, 0]]);
    }

    #[test]
    fn test_extension_keeps_prefix() {
        let found = collect(&[1, 3, 0, 0], 2, 4);
        assert_eq!(found, vec![vec![1, 3, 0, 2]]);

        let found = collect(&[0, 2, 0, 0], 2, 4);
        assert!(found.is_empty());
    }

    #[test]
    fn test_input_board_untouched() {
        let pos = vec![2, 0, 7, 7, 7];
        let _ = collect(&pos, 2, 5);
        assert_eq!(pos, vec![2, 0, 7, 7, 7]);
    }

    #[test]
    fn test_deterministic() {
        let a = collect(&[0; 6], 0, 6);
        let b = collect(&[0; 6], 0, 6);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(a, sorted);
    }

    #[test]
    fn test_random_prefixes_extend_validly() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 8;
        let prefixes = collect(&vec![0; n], 0, 3);

        for _ in 0..10 {
            let prefix = &prefixes[rng.random_range(0..prefixes.len())];
            let mut pos = vec![0; n];
            pos[..3].copy_from_slice(prefix);

            for solution in collect(&pos, 3, n) {
                assert_eq!(solution.len(), n);
                assert_eq!(&solution[..3], prefix.as_slice());
                assert!(is_valid_prefix(&solution));
            }
        }
    }

    #[test]
    fn test_search_is_fused() {
        let mut search = LevelSearch::new(&[0; 4], 0, 4).unwrap();
        assert_eq!(search.size(), 4);
        assert!(search.next_solution().is_some());
        assert!(search.next_solution().is_some());
        assert!(search.next_solution().is_none());
        assert!(search.next_solution().is_none());
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(matches!(
            LevelSearch::new(&[], 0, 0),
            Err(SolverError::InvalidParameters { .. })
        ));
        assert!(matches!(
            LevelSearch::new(&[0; 4], 3, 2),
            Err(SolverError::InvalidParameters { .. })
        ));
        assert!(matches!(
            LevelSearch::new(&[0; 4], 0, 5),
            Err(SolverError::InvalidParameters { .. })
        ));
    }
}
