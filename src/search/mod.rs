//! N-queens search: the backtracking generator and the ways of driving it
//!
//! - Sequential: one thread runs the generator over every row
//! - Parallel: a coordinator enumerates prefixes to the split depth and hands
//!   each one to an idle worker, which completes the remaining rows

pub mod accumulator;
pub mod config;
pub mod generator;
pub mod parallel;
pub mod result;

pub use accumulator::SolutionAccumulator;
pub use config::ProblemParams;
#[allow(unused_imports)]
pub use generator::{LevelSearch, generate};
#[allow(unused_imports)]
pub use parallel::{ParallelConfig, ParallelResult, PollStrategy, run_parallel_search};
pub use result::{SearchStatistics, SolutionSet, WorkerStatistics};

use crate::error::SolverError;
use std::time::Instant;

/// Solve an `n`-queens problem in the calling thread.
///
/// Returns every solution together with statistics comparable to a parallel run
/// (the whole board counts as a single partial configuration).
pub fn solve_sequential(n: usize) -> Result<(SolutionSet, SearchStatistics), SolverError> {
    let params = ProblemParams::new(n, n)?;
    let start_time = Instant::now();

    let mut accumulator = SolutionAccumulator::new();
    let board = vec![0; params.n()];
    generate(&board, 0, params.n(), |solution| accumulator.add(solution))?;

    let solutions = SolutionSet::from_flat(params.n(), accumulator.drain())?;
    let statistics = SearchStatistics {
        elapsed_time: start_time.elapsed(),
        partials_dispatched: 1,
        results_received: 1,
        solutions_found: solutions.len() as u64,
    };
    Ok((solutions, statistics))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_four() {
        let (solutions, stats) = solve_sequential(4).unwrap();
        assert_eq!(
            solutions.sorted_boards(),
            vec![vec![1, 3, 0, 2], vec![2, 0, 3, 1]]
        );
        assert_eq!(stats.solutions_found, 2);
    }

    #[test]
    fn test_sequential_one() {
        let (solutions, _) = solve_sequential(1).unwrap();
        assert_eq!(solutions.as_flat(), &[0]);
    }

    #[test]
    fn test_sequential_no_solutions() {
        let (solutions, stats) = solve_sequential(3).unwrap();
        assert!(solutions.is_empty());
        assert_eq!(stats.solutions_found, 0);
    }

    #[test]
    fn test_sequential_rejects_zero() {
        assert!(solve_sequential(0).is_err());
    }
}
