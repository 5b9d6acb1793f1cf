//! CPU scheduling simulator.
//!
//! Replays a fixed process set under four classical policies (FCFS, SJF,
//! Priority and Round Robin) and reports a deterministic timeline plus a
//! summary metric for each.
//!
//! Pipeline:
//! 1. `ingest` reads the process table once
//! 2. `scheduler::Simulator` runs each policy on its own copy
//! 3. `report::Reporter` prints the trace, pacing it with a `pacing::Pacer`

// Allow clippy warning triggered by PyO3 macro expansion
#![cfg_attr(feature = "python", allow(clippy::useless_conversion))]

use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

pub mod config;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod pacing;
#[cfg(feature = "python")]
mod python;
pub mod report;
pub mod scheduler;

pub use config::SimulatorConfig;
pub use ingest::{load_processes, parse_row, read_processes, IngestError, RowRejection};
pub use models::{Interval, Process, Summary, Ticks};
pub use pacing::{NoPacing, Pacer, WallClock};
pub use report::Reporter;
pub use scheduler::{Algorithm, AlgorithmRun, SchedulerError, Simulator};

/// Top-level failure of a report run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error("Failed to write report: {0}")]
    Report(#[from] io::Error),
}

/// Ingest `path`, then run and report each of `algorithms` in order.
///
/// Nothing is written if ingestion fails or yields no processes. Each run's
/// working copy is dropped once its report has been written; only the
/// summaries are returned.
pub fn run_cpu_scheduler<W: Write, P: Pacer>(
    path: &Path,
    config: &SimulatorConfig,
    algorithms: &[Algorithm],
    out: W,
    pacer: P,
) -> Result<Vec<(Algorithm, Summary)>, Error> {
    let simulator = Simulator::from_path(path, config.clone())?;
    let mut reporter = Reporter::new(out, pacer);

    let mut summaries = Vec::with_capacity(algorithms.len());
    for &algorithm in algorithms {
        let run = simulator.run(algorithm);
        reporter.emit(&run)?;
        summaries.push((algorithm, run.summary));
    }
    Ok(summaries)
}
