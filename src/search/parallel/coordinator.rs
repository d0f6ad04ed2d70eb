//! Parallel search coordinator that hands partial boards to worker threads.
//!
//! The coordinator runs on the caller's thread and goes through these phases:
//! broadcast parameters, dispatch every prefix of depth `k` (each one to
//! whichever worker announces readiness first), drain outstanding reports,
//! then send termination to every worker.

use crate::board::{Board, Column};
use crate::error::SolverError;
use crate::search::accumulator::SolutionAccumulator;
use crate::search::config::ProblemParams;
use crate::search::generator::LevelSearch;
use crate::search::parallel::channel::{
    CoordinatorChannels, ReadyStatus, Readiness, Termination, create_channels,
};
use crate::search::parallel::config::ParallelConfig;
use crate::search::parallel::worker::run_worker;
use crate::search::result::{SearchStatistics, SolutionSet, WorkerStatistics};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result from parallel search execution.
#[derive(Debug)]
pub struct ParallelResult {
    /// Every solution found, in no particular order.
    pub solutions: SolutionSet,
    /// Statistics kept by the coordinator.
    pub statistics: SearchStatistics,
    /// Per-worker statistics, ordered by worker id.
    pub worker_statistics: Vec<WorkerStatistics>,
}

/// What the coordinator returns once every worker has been terminated.
#[derive(Debug)]
pub struct CoordinatorOutcome {
    pub solutions: SolutionSet,
    pub statistics: SearchStatistics,
}

/// Phases of a coordinator run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoordinatorPhase {
    BroadcastingParams,
    Dispatching,
    Draining,
    Terminating,
    Done,
}

/// What the coordinator knows about a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerSlot {
    /// No readiness received yet.
    Unannounced,
    /// Announced readiness, holds no work.
    Idle,
    /// Holds an assignment whose outcome has not been reported.
    Busy,
}

/// Run parallel search with the given configuration.
///
/// Spawns `config.num_workers` worker threads, runs the coordinator on the
/// calling thread and joins every worker. Any failure fails the whole run.
pub fn run_parallel_search(
    params: ProblemParams,
    config: &ParallelConfig,
) -> Result<ParallelResult, SolverError> {
    info!(%params, workers = config.num_workers, poll = %config.poll, "starting parallel search");

    let (coordinator_channels, worker_channels) = create_channels(config.num_workers);

    let mut worker_handles = Vec::with_capacity(config.num_workers);
    for channels in worker_channels {
        let worker_id = channels.worker_id;
        let poll = config.poll;
        let handle = std::thread::Builder::new()
            .name(format!("nqueens-worker-{}", worker_id))
            .spawn(move || run_worker(channels, poll))
            .map_err(|e| {
                SolverError::transport(format!("failed to spawn worker {}: {}", worker_id, e))
            })?;
        worker_handles.push((worker_id, handle));
    }

    // Consumes the channels: on error every worker sees a disconnect and exits.
    let outcome = run_coordinator(params, coordinator_channels);

    let mut worker_statistics = Vec::with_capacity(worker_handles.len());
    let mut worker_errors = Vec::new();
    for (worker_id, handle) in worker_handles {
        match handle.join() {
            Ok(Ok(stats)) => worker_statistics.push(stats),
            Ok(Err(e)) => {
                warn!(worker_id, error = %e, "worker failed");
                worker_errors.push((worker_id, e));
            }
            Err(_) => return Err(SolverError::WorkerPanicked { worker_id }),
        }
    }

    let outcome = match outcome {
        Ok(outcome) => outcome,
        // Report why the worker gave up rather than just that it did.
        Err(SolverError::WorkerFailed { worker_id }) => {
            let cause = worker_errors.into_iter().find(|(id, _)| *id == worker_id);
            return Err(cause.map_or(SolverError::WorkerFailed { worker_id }, |(_, e)| e));
        }
        Err(e) => return Err(e),
    };
    if let Some((_, e)) = worker_errors.into_iter().next() {
        return Err(e);
    }

    info!(
        solutions = outcome.solutions.len(),
        elapsed = ?outcome.statistics.elapsed_time,
        "parallel search finished"
    );

    Ok(ParallelResult {
        solutions: outcome.solutions,
        statistics: outcome.statistics,
        worker_statistics,
    })
}

/// Coordinator loop: dispatch every prefix of depth `k`, collect every report,
/// then terminate all workers.
pub fn run_coordinator(
    params: ProblemParams,
    channels: CoordinatorChannels,
) -> Result<CoordinatorOutcome, SolverError> {
    let start_time = Instant::now();
    let mut coordinator = Coordinator::new(params, channels);

    coordinator.broadcast_params()?;
    coordinator.dispatch_all()?;
    coordinator.drain()?;
    coordinator.terminate_all()?;

    let mut outcome = coordinator.finish()?;
    outcome.statistics.elapsed_time = start_time.elapsed();
    Ok(outcome)
}

struct Coordinator {
    params: ProblemParams,
    channels: CoordinatorChannels,
    accumulator: SolutionAccumulator,
    slots: Vec<WorkerSlot>,
    /// Workers holding unfinished work. Always equals the number of `Busy` slots.
    active_workers: usize,
    phase: CoordinatorPhase,
    statistics: SearchStatistics,
}

impl Coordinator {
    fn new(params: ProblemParams, channels: CoordinatorChannels) -> Self {
        let num_workers = channels.num_workers();
        Self {
            params,
            channels,
            accumulator: SolutionAccumulator::new(),
            slots: vec![WorkerSlot::Unannounced; num_workers],
            active_workers: 0,
            phase: CoordinatorPhase::BroadcastingParams,
            statistics: SearchStatistics::default(),
        }
    }

    fn enter(&mut self, phase: CoordinatorPhase) {
        debug!(from = ?self.phase, to = ?phase, active = self.active_workers, "coordinator phase");
        self.phase = phase;
    }

    fn broadcast_params(&mut self) -> Result<(), SolverError> {
        if self.channels.workers.is_empty() {
            return Err(SolverError::invalid_parameters("at least one worker is required"));
        }
        for (worker_id, link) in self.channels.workers.iter().enumerate() {
            link.params.send(self.params).map_err(|_| {
                SolverError::transport(format!(
                    "worker {} is gone before receiving parameters",
                    worker_id
                ))
            })?;
        }
        Ok(())
    }

    fn dispatch_all(&mut self) -> Result<(), SolverError> {
        self.enter(CoordinatorPhase::Dispatching);
        let board = vec![0; self.params.n()];
        let mut search = LevelSearch::new(&board, 0, self.params.k())?;
        while let Some(prefix) = search.next_solution() {
            self.dispatch(prefix)?;
        }
        info!(
            partials = self.statistics.partials_dispatched,
            "all partial configurations dispatched"
        );
        Ok(())
    }

    /// Wait for any ready worker, settle its report, then hand it `prefix`.
    fn dispatch(&mut self, prefix: &[Column]) -> Result<(), SolverError> {
        let worker_id = self.receive_report()?;

        let mut assignment: Board = vec![0; self.params.n()];
        assignment[..prefix.len()].copy_from_slice(prefix);

        self.channels.workers[worker_id]
            .work
            .send(assignment)
            .map_err(|_| SolverError::transport(format!("worker {} is gone", worker_id)))?;

        self.slots[worker_id] = WorkerSlot::Busy;
        self.active_workers += 1;
        self.statistics.partials_dispatched += 1;
        debug!(worker_id, ?prefix, active = self.active_workers, "assigned partial configuration");
        Ok(())
    }

    fn drain(&mut self) -> Result<(), SolverError> {
        self.enter(CoordinatorPhase::Draining);
        while self.active_workers > 0 {
            self.receive_report()?;
        }
        Ok(())
    }

    fn terminate_all(&mut self) -> Result<(), SolverError> {
        self.enter(CoordinatorPhase::Terminating);
        for (worker_id, link) in self.channels.workers.iter().enumerate() {
            link.terminate.send(Termination).map_err(|_| {
                SolverError::transport(format!("worker {} is gone before termination", worker_id))
            })?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<CoordinatorOutcome, SolverError> {
        self.enter(CoordinatorPhase::Done);
        let solutions = SolutionSet::from_flat(self.params.n(), self.accumulator.drain())?;
        self.statistics.solutions_found = solutions.len() as u64;
        Ok(CoordinatorOutcome {
            solutions,
            statistics: self.statistics,
        })
    }

    /// Block until some worker announces readiness and settle what it reports.
    ///
    /// Returns the id of that worker, which now holds no work.
    fn receive_report(&mut self) -> Result<usize, SolverError> {
        let Readiness { worker_id, status } = self
            .channels
            .readiness
            .recv()
            .map_err(|_| SolverError::transport("every worker is gone"))?;

        let slot = *self.slots.get(worker_id).ok_or_else(|| {
            SolverError::protocol(worker_id, "readiness from an unknown worker")
        })?;

        match (status, slot) {
            (ReadyStatus::Failed, _) => {
                return Err(SolverError::WorkerFailed { worker_id });
            }
            (ReadyStatus::Initial, WorkerSlot::Unannounced) => {
                self.reject_stray_payload(worker_id)?;
            }
            (ReadyStatus::Initial, _) => {
                return Err(SolverError::protocol(worker_id, "initial readiness announced twice"));
            }
            (_, WorkerSlot::Unannounced | WorkerSlot::Idle) => {
                return Err(SolverError::protocol(
                    worker_id,
                    "reported an outcome without holding work",
                ));
            }
            (ReadyStatus::NoSolutions, WorkerSlot::Busy) => {
                self.reject_stray_payload(worker_id)?;
                self.release(worker_id);
            }
            (ReadyStatus::SolutionsAttached, WorkerSlot::Busy) => {
                self.collect_payload(worker_id)?;
                self.release(worker_id);
            }
        }

        self.slots[worker_id] = WorkerSlot::Idle;
        Ok(worker_id)
    }

    /// Receive the payload that must follow a "solutions attached" announcement.
    fn collect_payload(&mut self, worker_id: usize) -> Result<(), SolverError> {
        let payload = self.channels.workers[worker_id]
            .results
            .recv()
            .map_err(|_| {
                SolverError::transport(format!(
                    "worker {} is gone before sending its results",
                    worker_id
                ))
            })?;

        let n = self.params.n();
        if payload.is_empty() || payload.len() % n != 0 {
            return Err(SolverError::protocol(
                worker_id,
                format!(
                    "result payload of length {} is not a positive multiple of {}",
                    payload.len(),
                    n
                ),
            ));
        }

        debug!(worker_id, solutions = payload.len() / n, "collected solutions");
        self.accumulator.add(&payload);
        Ok(())
    }

    /// A payload queued behind any announcement other than "solutions attached"
    /// means the two sides are out of step.
    fn reject_stray_payload(&self, worker_id: usize) -> Result<(), SolverError> {
        if self.channels.workers[worker_id].results.try_recv().is_ok() {
            return Err(SolverError::protocol(
                worker_id,
                "result payload without a solutions-attached announcement",
            ));
        }
        Ok(())
    }

    fn release(&mut self, worker_id: usize) {
        self.active_workers -= 1;
        self.statistics.results_received += 1;
        debug!(worker_id, active = self.active_workers, "worker finished its assignment");
    }
}
