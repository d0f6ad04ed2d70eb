//! Error type shared by the search engine and the coordinator/worker protocol.

use thiserror::Error;

/// Everything that can end a run early.
///
/// None of these are recoverable: a failed run yields no solutions at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Problem size, split depth or level range rejected before any search starts.
    #[error("invalid parameters: {message}")]
    InvalidParameters { message: String },

    /// A channel peer went away (send or receive on a disconnected channel).
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// Messages arrived in an order the protocol does not allow.
    #[error("protocol violation from worker {worker_id}: {message}")]
    Protocol { worker_id: usize, message: String },

    /// A worker thread panicked instead of returning.
    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    /// A worker announced that it gave up; its own error says why.
    #[error("worker {worker_id} failed")]
    WorkerFailed { worker_id: usize },
}

impl SolverError {
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn protocol(worker_id: usize, message: impl Into<String>) -> Self {
        Self::Protocol {
            worker_id,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SolverError::invalid_parameters("k (5) exceeds n (4)");
        assert_eq!(err.to_string(), "invalid parameters: k (5) exceeds n (4)");

        let err = SolverError::protocol(3, "result without readiness");
        assert_eq!(
            err.to_string(),
            "protocol violation from worker 3: result without readiness"
        );

        let err = SolverError::WorkerPanicked { worker_id: 1 };
        assert_eq!(err.to_string(), "worker 1 panicked");

        let err = SolverError::WorkerFailed { worker_id: 2 };
        assert_eq!(err.to_string(), "worker 2 failed");
    }
}
