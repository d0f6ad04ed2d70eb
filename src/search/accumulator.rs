//! Append-only store for solutions found by one role.

use crate::board::Column;

/// Collects solutions as one flat sequence (solution after solution).
///
/// Each coordinator and worker owns its own accumulator; nothing is shared.
#[derive(Debug, Clone, Default)]
pub struct SolutionAccumulator {
    solutions: Vec<Column>,
}

impl SolutionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every entry of `solution`.
    pub fn add(&mut self, solution: &[Column]) {
        self.solutions.extend_from_slice(solution);
    }

    /// Take the collected entries and leave the accumulator empty.
    pub fn drain(&mut self) -> Vec<Column> {
        std::mem::take(&mut self.solutions)
    }

    /// Number of stored entries (not solutions).
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}
