//! Configuration for parallel search execution.

use std::time::Duration;

/// How an idle worker waits between checks for work or termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStrategy {
    /// Check again immediately (busy-poll, keeps a core pegged while idle).
    Spin,
    /// Sleep between checks, doubling from `initial` up to `max`; reset as soon
    /// as work arrives.
    Backoff { initial: Duration, max: Duration },
}

impl Default for PollStrategy {
    fn default() -> Self {
        PollStrategy::Backoff {
            initial: Duration::from_micros(10),
            max: Duration::from_millis(1),
        }
    }
}

impl std::fmt::Display for PollStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollStrategy::Spin => write!(f, "spin"),
            PollStrategy::Backoff { initial, max } => {
                write!(f, "backoff ({:?}..{:?})", initial, max)
            }
        }
    }
}

/// Configuration for parallel search execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads to spawn (the coordinator runs on the caller's thread).
    pub num_workers: usize,
    /// Idle wait used by every worker.
    pub poll: PollStrategy,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            poll: PollStrategy::default(),
        }
    }
}

impl ParallelConfig {
    /// Create a new parallel config with the specified number of workers.
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Set the number of workers from an Option (None keeps the current value).
    pub fn with_workers_option(self, num_workers: Option<usize>) -> Self {
        match num_workers {
            Some(n) => self.with_workers(n),
            None => self,
        }
    }

    pub fn with_poll(mut self, poll: PollStrategy) -> Self {
        self.poll = poll;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParallelConfig::default();
        assert!(config.num_workers >= 1);
        assert_eq!(config.poll, PollStrategy::default());
    }

    #[test]
    fn test_config_builder() {
        let config = ParallelConfig::default()
            .with_workers(4)
            .with_poll(PollStrategy::Spin);

        assert_eq!(config.num_workers, 4);
        assert_eq!(config.poll, PollStrategy::Spin);
    }

    #[test]
    fn test_workers_option() {
        let config = ParallelConfig::default().with_workers(3);
        assert_eq!(config.clone().with_workers_option(None).num_workers, 3);
        assert_eq!(config.with_workers_option(Some(7)).num_workers, 7);
    }

    #[test]
    fn test_minimum_workers() {
        let config = ParallelConfig::default().with_workers(0);
        assert_eq!(config.num_workers, 1);
    }

    #[test]
    fn test_poll_display() {
        assert_eq!(PollStrategy::Spin.to_string(), "spin");
        assert!(PollStrategy::default().to_string().starts_with("backoff"));
    }
}
