//! Channels between the coordinator and its workers.
//!
//! One channel per message kind, so each side can wait on exactly the kind it
//! expects next:
//! - readiness: shared by all workers, the coordinator receives from any of them
//! - results: one per worker, read only after that worker announced a payload
//! - params, work, terminate: one per worker, coordinator to worker

use crate::board::{Board, Column};
use crate::error::SolverError;
use crate::search::config::ProblemParams;
use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, unbounded};

/// What a worker reports when it asks for work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyStatus {
    /// First announcement, no previous assignment.
    Initial,
    /// Previous assignment finished without solutions.
    NoSolutions,
    /// Previous assignment produced solutions; the payload follows on the
    /// worker's results channel.
    SolutionsAttached,
    /// The worker hit an error and is exiting.
    Failed,
}

/// Readiness announcement sent from a worker to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    pub worker_id: usize,
    pub status: ReadyStatus,
}

/// Sentinel telling a worker to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination;

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    pub worker_id: usize,
    /// Receive the problem parameters (once).
    pub params: Receiver<ProblemParams>,
    /// Announce readiness to the coordinator.
    pub readiness: Sender<Readiness>,
    /// Send flattened solutions to the coordinator.
    pub results: Sender<Vec<Column>>,
    /// Receive partial boards.
    pub work: Receiver<Board>,
    /// Receive the termination sentinel.
    pub terminate: Receiver<Termination>,
}

impl WorkerChannels {
    /// Send a readiness announcement.
    pub fn announce(&self, status: ReadyStatus) -> Result<(), SolverError> {
        self.readiness
            .send(Readiness {
                worker_id: self.worker_id,
                status,
            })
            .map_err(|_| SolverError::transport("coordinator stopped receiving readiness"))
    }

    /// Send a result payload.
    pub fn send_results(&self, solutions: Vec<Column>) -> Result<(), SolverError> {
        self.results
            .send(solutions)
            .map_err(|_| SolverError::transport("coordinator stopped receiving results"))
    }

    /// Non-blocking check for the termination sentinel.
    pub fn termination_received(&self) -> Result<bool, SolverError> {
        match self.terminate.try_recv() {
            Ok(Termination) => Ok(true),
            Err(TryRecvError::Empty) => Ok(false),
            Err(TryRecvError::Disconnected) => Err(SolverError::transport(
                "coordinator went away without sending termination",
            )),
        }
    }
}

/// Coordinator-side endpoints for one worker.
pub struct WorkerLink {
    pub params: Sender<ProblemParams>,
    pub results: Receiver<Vec<Column>>,
    pub work: Sender<Board>,
    pub terminate: Sender<Termination>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Readiness announcements from all workers.
    pub readiness: Receiver<Readiness>,
    /// Per-worker endpoints, indexed by worker id.
    pub workers: Vec<WorkerLink>,
}

impl CoordinatorChannels {
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }
}

/// Create channels for a coordinator and `num_workers` workers.
pub fn create_channels(num_workers: usize) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    // Unbounded from workers: announcing readiness never blocks a worker
    let (readiness_tx, readiness_rx) = unbounded();

    let mut links = Vec::with_capacity(num_workers);
    let mut worker_channels = Vec::with_capacity(num_workers);

    for worker_id in 0..num_workers {
        let (params_tx, params_rx) = bounded(1);
        let (results_tx, results_rx) = unbounded();
        let (work_tx, work_rx) = unbounded();
        let (terminate_tx, terminate_rx) = bounded(1);

        links.push(WorkerLink {
            params: params_tx,
            results: results_rx,
            work: work_tx,
            terminate: terminate_tx,
        });
        worker_channels.push(WorkerChannels {
            worker_id,
            params: params_rx,
            readiness: readiness_tx.clone(),
            results: results_tx,
            work: work_rx,
            terminate: terminate_rx,
        });
    }

    let coordinator = CoordinatorChannels {
        readiness: readiness_rx,
        workers: links,
    };

    (coordinator, worker_channels)
}
