use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod board;
mod error;
mod search;

use board::format_board;
use error::SolverError;
use search::{
    ParallelConfig, PollStrategy, ProblemParams, SearchStatistics, SolutionSet, WorkerStatistics,
    run_parallel_search, solve_sequential,
};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "nqueens")]
#[command(about = "nqueens - master-worker n-queens solver")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// CLI idle-wait selection for workers
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliPoll {
    /// Busy-poll without pausing
    Spin,
    /// Sleep between polls with exponential backoff
    Backoff,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve with a coordinator and a pool of worker threads
    Solve {
        /// Board size
        n: usize,
        /// Split depth: rows enumerated by the coordinator before handing off
        /// (defaults to 3, clipped to the board size)
        #[arg(long, short = 'k')]
        depth: Option<usize>,
        /// Number of worker threads (defaults to the number of CPUs)
        #[arg(long, short = 'j')]
        workers: Option<usize>,
        /// How idle workers wait for work
        #[arg(long, value_enum, default_value = "backoff")]
        poll: CliPoll,
        /// Longest pause between polls, in microseconds (backoff only)
        #[arg(long, default_value = "1000")]
        max_backoff_us: u64,
        /// Print every solution
        #[arg(long)]
        show: bool,
        /// Enable verbose output
        #[arg(long, short)]
        verbose: bool,
    },
    /// Solve in a single thread
    Sequential {
        /// Board size
        n: usize,
        /// Print every solution
        #[arg(long)]
        show: bool,
        /// Enable verbose output
        #[arg(long, short)]
        verbose: bool,
    },
}

// --- Logging ---

/// Log to stderr. `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// --- Solving ---

fn run_solve(
    n: usize,
    depth: Option<usize>,
    config: &ParallelConfig,
    show: bool,
) -> Result<(), SolverError> {
    let params = match depth {
        Some(k) => ProblemParams::new(n, k)?,
        None => ProblemParams::with_default_depth(n)?,
    };

    println!(
        "Solving {}-queens with {} workers (split depth {}, poll {})",
        params.n(),
        config.num_workers,
        params.k(),
        config.poll
    );

    let result = run_parallel_search(params, config)?;

    print_solutions(&result.solutions, show);
    print_search_statistics(&result.statistics);
    print_worker_statistics(&result.worker_statistics);
    Ok(())
}

fn run_sequential(n: usize, show: bool) -> Result<(), SolverError> {
    println!("Solving {}-queens sequentially", n);

    let (solutions, statistics) = solve_sequential(n)?;

    print_solutions(&solutions, show);
    print_search_statistics(&statistics);
    Ok(())
}

fn poll_strategy(poll: CliPoll, max_backoff_us: u64) -> PollStrategy {
    match poll {
        CliPoll::Spin => PollStrategy::Spin,
        CliPoll::Backoff => {
            let max = Duration::from_micros(max_backoff_us.max(1));
            let initial = Duration::from_micros(10).min(max);
            PollStrategy::Backoff { initial, max }
        }
    }
}

// --- Output ---

fn print_solutions(solutions: &SolutionSet, show: bool) {
    println!("\nFound {} solutions.", solutions.len());
    if show {
        for (i, board) in solutions.sorted_boards().iter().enumerate() {
            println!("\nSolution {}: {:?}", i + 1, board);
            print!("{}", format_board(board));
        }
    }
}

/// Print search statistics
fn print_search_statistics(stats: &SearchStatistics) {
    println!("\nSearch Statistics:");
    for line in stats.format_summary().lines() {
        println!("  {}", line);
    }
}

fn print_worker_statistics(workers: &[WorkerStatistics]) {
    println!("\nWorker Statistics:");
    for stats in workers {
        println!(
            "  worker {}: {} assignments, {} solutions, busy {:.2?}, {} idle polls",
            stats.worker_id,
            stats.assignments_completed,
            stats.solutions_found,
            stats.busy_time,
            stats.idle_polls
        );
    }
}

// --- Main Function ---
fn main() {
    let args = Args::parse();

    match args.command {
        Commands::Solve {
            n,
            depth,
            workers,
            poll,
            max_backoff_us,
            show,
            verbose,
        } => {
            init_tracing(verbose);

            let config = ParallelConfig::default()
                .with_workers_option(workers)
                .with_poll(poll_strategy(poll, max_backoff_us));

            if let Err(e) = run_solve(n, depth, &config, show) {
                eprintln!("Error during parallel search: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Sequential { n, show, verbose } => {
            init_tracing(verbose);

            if let Err(e) = run_sequential(n, show) {
                eprintln!("Error during sequential search: {}", e);
                std::process::exit(1);
            }
        }
    }
}
