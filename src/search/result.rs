//! Search result types and statistics

use crate::board::Column;
use crate::error::SolverError;
use std::time::Duration;

/// Every full board found by a run, stored flat (solution after solution).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionSet {
    n: usize,
    flat: Vec<Column>,
}

impl SolutionSet {
    /// Wrap a flat sequence of solutions of size `n`.
    pub fn from_flat(n: usize, flat: Vec<Column>) -> Result<Self, SolverError> {
        if n == 0 {
            return Err(SolverError::invalid_parameters("board size must be at least 1"));
        }
        if flat.len() % n != 0 {
            return Err(SolverError::invalid_parameters(format!(
                "{} entries do not split into boards of size {}",
                flat.len(),
                n
            )));
        }
        Ok(Self { n, flat })
    }

    /// Board size.
    #[cfg(test)]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Number of solutions.
    pub fn len(&self) -> usize {
        self.flat.len() / self.n
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Iterate over the solutions, one board at a time.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, Column> {
        self.flat.chunks_exact(self.n)
    }

    /// The solutions in lexicographic order, for order-independent comparison.
    pub fn sorted_boards(&self) -> Vec<Vec<Column>> {
        let mut boards: Vec<Vec<Column>> = self.iter().map(<[Column]>::to_vec).collect();
        boards.sort();
        boards
    }

    #[cfg(test)]
    pub fn as_flat(&self) -> &[Column] {
        &self.flat
    }
}

/// Statistics kept by the coordinator
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Total wall time of the run
    pub elapsed_time: Duration,
    /// Partial configurations handed to workers
    pub partials_dispatched: u64,
    /// Worker reports received (with or without solutions)
    pub results_received: u64,
    /// Full boards collected
    pub solutions_found: u64,
}

impl SearchStatistics {
    /// Partial configurations completed per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.results_received as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!(
            "Partial configurations dispatched: {}\n",
            self.partials_dispatched
        ));
        s.push_str(&format!("Worker reports received: {}\n", self.results_received));
        s.push_str(&format!(
            "Throughput: {:.0} partials/sec\n",
            self.throughput()
        ));
        s.push_str(&format!("Solutions found: {}\n", self.solutions_found));
        s
    }
}

/// Statistics returned by one worker when it terminates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStatistics {
    pub worker_id: usize,
    /// Assignments received and completed
    pub assignments_completed: u64,
    /// Full boards found across all assignments
    pub solutions_found: u64,
    /// Poll iterations that found neither work nor termination
    pub idle_polls: u64,
    /// Time spent searching (excludes waiting)
    pub busy_time: Duration,
}

impl WorkerStatistics {
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ..Default::default()
        }
    }
}
