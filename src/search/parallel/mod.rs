//! Master-worker execution of the n-queens search.
//!
//! # Architecture
//!
//! The parallel search system consists of:
//! - A **coordinator** that enumerates every valid prefix of depth `k` and hands
//!   each one to whichever worker announces readiness first
//! - Multiple **workers** that complete rows `[k, n)` for each prefix they are
//!   given and report back
//! - A **channel system** with one channel per message kind, so the coordinator
//!   can receive readiness from any worker but read a result payload only from
//!   the worker that announced it
//!
//! Roles share no mutable state: each owns its own accumulator and the
//! coordinator alone tracks how many workers hold unfinished work.
//!
//! # Example
//!
//! ```ignore
//! use nqueens::search::{ProblemParams, parallel::{ParallelConfig, run_parallel_search}};
//!
//! let params = ProblemParams::new(8, 3)?;
//! let config = ParallelConfig::default().with_workers(4);
//!
//! let result = run_parallel_search(params, &config)?;
//! assert_eq!(result.solutions.len(), 92);
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod worker;

pub use config::{ParallelConfig, PollStrategy};
pub use coordinator::{ParallelResult, run_parallel_search};
