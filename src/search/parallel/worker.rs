//! Worker role: complete the partial boards handed out by the coordinator.
//!
//! Lifecycle:
//! 1. Block until the problem parameters arrive
//! 2. Announce readiness with no result
//! 3. Poll for work and termination without blocking; for each board received,
//!    search rows `[k, n)` and announce the outcome (with the payload if any)
//! 4. Return once termination has been observed

use crate::board::{Board, Column, is_valid_prefix};
use crate::error::SolverError;
use crate::search::accumulator::SolutionAccumulator;
use crate::search::config::ProblemParams;
use crate::search::generator::generate;
use crate::search::parallel::channel::{ReadyStatus, WorkerChannels};
use crate::search::parallel::config::PollStrategy;
use crate::search::result::WorkerStatistics;
use crossbeam_channel::TryRecvError;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Idle wait between two polls.
struct IdleWait {
    strategy: PollStrategy,
    current: Duration,
}

impl IdleWait {
    fn new(strategy: PollStrategy) -> Self {
        let current = match strategy {
            PollStrategy::Spin => Duration::ZERO,
            PollStrategy::Backoff { initial, .. } => initial,
        };
        Self { strategy, current }
    }

    fn wait(&mut self) {
        match self.strategy {
            PollStrategy::Spin => std::hint::spin_loop(),
            PollStrategy::Backoff { max, .. } => {
                std::thread::sleep(self.current);
                self.current = (self.current * 2).min(max);
            }
        }
    }

    fn reset(&mut self) {
        if let PollStrategy::Backoff { initial, .. } = self.strategy {
            self.current = initial;
        }
    }
}

/// Run a worker until the coordinator sends termination.
///
/// A worker that fails announces `Failed` before returning its error, so the
/// coordinator does not keep waiting for its report.
pub fn run_worker(
    channels: WorkerChannels,
    poll: PollStrategy,
) -> Result<WorkerStatistics, SolverError> {
    let result = serve(&channels, poll);
    if result.is_err() {
        // The coordinator may already be gone.
        let _ = channels.announce(ReadyStatus::Failed);
    }
    result
}

fn serve(channels: &WorkerChannels, poll: PollStrategy) -> Result<WorkerStatistics, SolverError> {
    let worker_id = channels.worker_id;
    let params = channels.params.recv().map_err(|_| {
        SolverError::transport("coordinator went away before broadcasting parameters")
    })?;
    debug!(worker_id, %params, "received parameters");

    let mut stats = WorkerStatistics::new(worker_id);
    let mut accumulator = SolutionAccumulator::new();
    let mut idle = IdleWait::new(poll);

    // With fewer prefixes than workers the coordinator can terminate everyone
    // and hang up before this announcement goes out.
    if let Err(e) = channels.announce(ReadyStatus::Initial) {
        if channels.termination_received().unwrap_or(false) {
            debug!(worker_id, "terminated before announcing readiness");
            return Ok(stats);
        }
        return Err(e);
    }

    loop {
        if channels.termination_received()? {
            break;
        }

        match channels.work.try_recv() {
            Ok(board) => {
                idle.reset();
                let started = Instant::now();
                let solutions = complete_assignment(worker_id, &params, &board, &mut accumulator)?;
                stats.busy_time += started.elapsed();
                stats.assignments_completed += 1;

                if solutions.is_empty() {
                    debug!(worker_id, "assignment finished without solutions");
                    channels.announce(ReadyStatus::NoSolutions)?;
                } else {
                    let found = (solutions.len() / params.n()) as u64;
                    stats.solutions_found += found;
                    debug!(worker_id, found, "assignment finished");
                    channels.announce(ReadyStatus::SolutionsAttached)?;
                    channels.send_results(solutions)?;
                }
            }
            Err(TryRecvError::Empty) => {
                stats.idle_polls += 1;
                idle.wait();
            }
            Err(TryRecvError::Disconnected) => {
                // Termination may have been sent right before the coordinator
                // dropped its endpoints.
                if channels.termination_received()? {
                    break;
                }
                return Err(SolverError::transport("work channel closed without termination"));
            }
        }
    }

    debug!(
        worker_id,
        assignments = stats.assignments_completed,
        solutions = stats.solutions_found,
        "worker terminated"
    );
    Ok(stats)
}

/// Search rows `[k, n)` below the prefix in `board`, returning the flattened solutions.
fn complete_assignment(
    worker_id: usize,
    params: &ProblemParams,
    board: &Board,
    accumulator: &mut SolutionAccumulator,
) -> Result<Vec<Column>, SolverError> {
    if board.len() != params.n() {
        return Err(SolverError::protocol(
            worker_id,
            format!(
                "received a board of length {}, expected {}",
                board.len(),
                params.n()
            ),
        ));
    }
    if !is_valid_prefix(&board[..params.k()]) {
        warn!(worker_id, ?board, "received an invalid prefix, reporting no solutions");
        return Ok(Vec::new());
    }

    generate(board, params.k(), params.n(), |solution| accumulator.add(solution))?;
    Ok(accumulator.drain())
}
