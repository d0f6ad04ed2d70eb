//! Problem parameters shared by every role of a run

use crate::error::SolverError;

/// Split depth used when none is given: deep enough to produce a few dozen
/// work units on common board sizes, shallow enough that dispatch stays cheap.
pub const DEFAULT_SPLIT_DEPTH: usize = 3;

/// Parameters fixed for a whole run: board size `n` and split depth `k`.
///
/// The coordinator enumerates rows `[0, k)`; each worker completes rows `[k, n)`
/// for the prefixes it is handed. Once constructed the values are valid
/// (`n >= 1`, `k <= n`) and read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemParams {
    n: usize,
    k: usize,
}

impl ProblemParams {
    pub fn new(n: usize, k: usize) -> Result<Self, SolverError> {
        if n == 0 {
            return Err(SolverError::invalid_parameters("board size n must be at least 1"));
        }
        if k > n {
            return Err(SolverError::invalid_parameters(format!(
                "split depth k ({}) exceeds board size n ({})",
                k, n
            )));
        }
        if u32::try_from(n).is_err() {
            return Err(SolverError::invalid_parameters(format!(
                "board size n ({}) does not fit a column index",
                n
            )));
        }
        Ok(Self { n, k })
    }

    /// Parameters with the default split depth, clipped to `n`.
    pub fn with_default_depth(n: usize) -> Result<Self, SolverError> {
        Self::new(n, DEFAULT_SPLIT_DEPTH.min(n))
    }

    /// Board size.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Split depth.
    pub fn k(&self) -> usize {
        self.k
    }
}

impl std::fmt::Display for ProblemParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n={}, k={}", self.n, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_params() {
        let params = ProblemParams::new(8, 3).unwrap();
        assert_eq!(params.n(), 8);
        assert_eq!(params.k(), 3);
        assert_eq!(params.to_string(), "n=8, k=3");

        assert!(ProblemParams::new(1, 0).is_ok());
        assert!(ProblemParams::new(4, 4).is_ok());
    }

    #[test]
    fn test_rejects_zero_size() {
        assert!(matches!(
            ProblemParams::new(0, 0),
            Err(SolverError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_rejects_depth_past_size() {
        assert!(matches!(
            ProblemParams::new(4, 5),
            Err(SolverError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_default_depth_clipped() {
        assert_eq!(ProblemParams::with_default_depth(8).unwrap().k(), 3);
        assert_eq!(ProblemParams::with_default_depth(2).unwrap().k(), 2);
        assert!(ProblemParams::with_default_depth(0).is_err());
    }
}
