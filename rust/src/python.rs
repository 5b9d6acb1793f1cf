//! Python bindings (`--features python`).

use std::path::PathBuf;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::config::{SimulatorConfig, DEFAULT_MAX_PROCESSES};
use crate::models::{Process, Summary, Ticks};
use crate::report::format_interval;
use crate::scheduler::{Algorithm, AlgorithmRun, SchedulerError, Simulator};

fn to_py_err(err: SchedulerError) -> PyErr {
    match err {
        SchedulerError::Ingest(e) => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

#[pymethods]
impl Process {
    #[new]
    #[pyo3(signature = (name, description, arrival_time, burst_time, priority, original_order))]
    fn py_new(
        name: String,
        description: String,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: i32,
        original_order: usize,
    ) -> Self {
        Process::new(
            name,
            description,
            arrival_time,
            burst_time,
            priority,
            original_order,
        )
    }

    fn __repr__(&self) -> String {
        format!(
            "Process(name={:?}, arrival_time={}, burst_time={}, priority={})",
            self.name, self.arrival_time, self.burst_time, self.priority
        )
    }
}

#[pymethods]
impl SimulatorConfig {
    #[new]
    #[pyo3(signature = (quantum=None, unit_millis=None, max_processes=None, verbosity=None))]
    fn py_new(
        quantum: Option<Ticks>,
        unit_millis: Option<u64>,
        max_processes: Option<usize>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            quantum: quantum.unwrap_or(defaults.quantum),
            // Python callers get results, not a live trace
            unit_millis: unit_millis.unwrap_or(0),
            max_processes: max_processes.unwrap_or(defaults.max_processes),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulatorConfig(quantum={}, max_processes={})",
            self.quantum, self.max_processes
        )
    }
}

/// Result of one policy, flattened for Python.
#[pyclass(name = "AlgorithmReport")]
#[derive(Clone, Debug)]
pub struct PyAlgorithmReport {
    #[pyo3(get)]
    pub algorithm: String,
    #[pyo3(get)]
    pub trace: Vec<String>,
    #[pyo3(get)]
    pub processes: Vec<Process>,
    #[pyo3(get)]
    pub mean_waiting_time: Option<f64>,
    #[pyo3(get)]
    pub total_turnaround: Option<Ticks>,
}

#[pymethods]
impl PyAlgorithmReport {
    fn __repr__(&self) -> String {
        format!(
            "AlgorithmReport(algorithm={:?}, intervals={})",
            self.algorithm,
            self.trace.len()
        )
    }
}

impl From<AlgorithmRun> for PyAlgorithmReport {
    fn from(run: AlgorithmRun) -> Self {
        let trace = run
            .timeline
            .iter()
            .map(|interval| format_interval(interval, &run.processes))
            .collect();
        let (mean_waiting_time, total_turnaround) = match run.summary {
            Summary::MeanWaitingTime(mean) => (Some(mean), None),
            Summary::TotalTurnaround(total) => (None, Some(total)),
        };
        Self {
            algorithm: run.algorithm.name().to_string(),
            trace,
            processes: run.processes,
            mean_waiting_time,
            total_turnaround,
        }
    }
}

fn run_all(simulator: &Simulator) -> Vec<PyAlgorithmReport> {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| simulator.run(algorithm).into())
        .collect()
}

/// Run all four policies over an in-memory process list.
#[pyfunction]
#[pyo3(signature = (processes, config=None))]
fn simulate(
    processes: Vec<Process>,
    config: Option<SimulatorConfig>,
) -> PyResult<Vec<PyAlgorithmReport>> {
    let config = config.unwrap_or_default().without_pacing();
    let simulator = Simulator::new(processes, config).map_err(to_py_err)?;
    Ok(run_all(&simulator))
}

/// Ingest a process table and run all four policies over it.
///
/// Raises OSError if the file cannot be read, ValueError if it holds no
/// valid rows or the quantum is not positive.
#[pyfunction]
#[pyo3(signature = (path, quantum, max_processes=DEFAULT_MAX_PROCESSES))]
fn run_scheduler(
    path: PathBuf,
    quantum: Ticks,
    max_processes: usize,
) -> PyResult<Vec<PyAlgorithmReport>> {
    let config = SimulatorConfig {
        quantum,
        max_processes,
        ..SimulatorConfig::default()
    }
    .without_pacing();
    let simulator = Simulator::from_path(&path, config).map_err(to_py_err)?;
    Ok(run_all(&simulator))
}

/// The cpusched.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Process>()?;
    m.add_class::<SimulatorConfig>()?;
    m.add_class::<PyAlgorithmReport>()?;

    m.add_function(wrap_pyfunction!(simulate, m)?)?;
    m.add_function(wrap_pyfunction!(run_scheduler, m)?)?;

    Ok(())
}
