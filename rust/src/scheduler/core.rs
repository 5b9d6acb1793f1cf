//! Simulator driver: owns the ingested set and runs each policy on a copy.

use std::path::Path;

use thiserror::Error;

use crate::config::SimulatorConfig;
use crate::ingest::{load_processes, IngestError};
use crate::{log_checks, log_events};
use crate::models::{Interval, Process, Summary, Ticks};

use super::non_preemptive::{run_fcfs, run_selection};
use super::policy::Algorithm;
use super::round_robin::run_round_robin;
use super::state::RunState;

/// Errors that can occur before or during scheduling.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Could not read processes: {0}")]
    Ingest(#[from] IngestError),
    #[error("Could not read processes from file: no valid rows")]
    NoProcesses,
    #[error("Too many processes: {count} exceeds capacity {capacity}")]
    TooManyProcesses { count: usize, capacity: usize },
    #[error("Invalid process {name}: {reason}")]
    InvalidProcess { name: String, reason: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Outcome of running one policy against its own copy of the process set.
#[derive(Clone, Debug)]
pub struct AlgorithmRun {
    pub algorithm: Algorithm,
    /// Contiguous from 0 to `final_clock`.
    pub timeline: Vec<Interval>,
    /// The run's working copy, in ingestion order, with final run-state.
    pub processes: Vec<Process>,
    pub final_clock: Ticks,
    pub summary: Summary,
}

impl AlgorithmRun {
    /// Slots of the dispatched processes, one per running interval.
    pub fn dispatch_order(&self) -> Vec<usize> {
        self.timeline.iter().filter_map(Interval::process).collect()
    }

    /// Mean waiting time over every process of the run.
    pub fn mean_waiting_time(&self) -> f64 {
        let total: f64 = self
            .processes
            .iter()
            .filter_map(|p| p.waiting_time)
            .map(|w| w as f64)
            .sum();
        total / self.processes.len().max(1) as f64
    }

    /// Sum of every idle and running interval.
    pub fn total_turnaround(&self) -> Ticks {
        self.timeline.iter().map(Interval::len).sum()
    }

    pub fn idle_time(&self) -> Ticks {
        self.timeline
            .iter()
            .filter(|interval| interval.process().is_none())
            .map(Interval::len)
            .sum()
    }
}

fn clock_overflow(process: &Process) -> SchedulerError {
    SchedulerError::InvalidProcess {
        name: process.name.clone(),
        reason: "arrival and burst times overflow the simulation clock".to_string(),
    }
}

/// Holds the immutable input set and replays policies against it.
#[derive(Clone, Debug)]
pub struct Simulator {
    processes: Vec<Process>,
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator over an ingested process set.
    ///
    /// Run-state on the given records is reset; slots are the vector indices.
    pub fn new(processes: Vec<Process>, config: SimulatorConfig) -> Result<Self, SchedulerError> {
        config.validate()?;

        if processes.is_empty() {
            return Err(SchedulerError::NoProcesses);
        }
        if processes.len() > config.max_processes {
            return Err(SchedulerError::TooManyProcesses {
                count: processes.len(),
                capacity: config.max_processes,
            });
        }
        if let Some(p) = processes.iter().find(|p| p.burst_time == 0) {
            return Err(SchedulerError::InvalidProcess {
                name: p.name.clone(),
                reason: "burst_time must be positive".to_string(),
            });
        }

        // The clock never passes the latest arrival plus every burst
        let mut total_burst: Ticks = 0;
        for p in &processes {
            total_burst = total_burst
                .checked_add(p.burst_time)
                .ok_or_else(|| clock_overflow(p))?;
        }
        if let Some(p) = processes
            .iter()
            .find(|p| p.arrival_time.checked_add(total_burst).is_none())
        {
            return Err(clock_overflow(p));
        }

        let processes = processes
            .into_iter()
            .map(|p| {
                Process::new(
                    p.name,
                    p.description,
                    p.arrival_time,
                    p.burst_time,
                    p.priority,
                    p.original_order,
                )
            })
            .collect();

        Ok(Self { processes, config })
    }

    /// Ingest `path` and build a simulator over its records.
    pub fn from_path(path: &Path, config: SimulatorConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        let processes = load_processes(path, config.max_processes, config.verbosity)?;
        log_events!(
            config.verbosity,
            "Loaded {} processes from {}",
            processes.len(),
            path.display()
        );
        Self::new(processes, config)
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Run one policy on a fresh deep copy of the input.
    pub fn run(&self, algorithm: Algorithm) -> AlgorithmRun {
        let verbosity = self.config.verbosity;
        let mut processes = self.processes.clone();
        let mut state = RunState::new(verbosity);

        log_events!(
            verbosity,
            "{}: scheduling {} processes",
            algorithm,
            processes.len()
        );

        match algorithm {
            Algorithm::Fcfs => run_fcfs(&mut processes, &mut state),
            Algorithm::Sjf | Algorithm::Priority => {
                run_selection(algorithm, &mut processes, &mut state, verbosity)
            }
            Algorithm::RoundRobin => {
                run_round_robin(&mut processes, self.config.quantum, &mut state, verbosity)
            }
        }

        for p in &processes {
            log_checks!(
                verbosity,
                "{}: {} waited {:?}, turnaround {:?}",
                algorithm,
                p.name,
                p.waiting_time,
                p.turnaround_time()
            );
        }

        let final_clock = state.now();
        let mut run = AlgorithmRun {
            algorithm,
            timeline: state.into_timeline(),
            processes,
            final_clock,
            summary: Summary::TotalTurnaround(final_clock),
        };
        if !algorithm.is_preemptive() {
            run.summary = Summary::MeanWaitingTime(run.mean_waiting_time());
        }

        log_events!(
            verbosity,
            "{}: finished at t={} ({:?})",
            algorithm,
            final_clock,
            run.summary
        );
        run
    }

    /// Run every policy in report order.
    pub fn run_all(&self) -> Vec<AlgorithmRun> {
        Algorithm::ALL.iter().map(|&a| self.run(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scenario() -> Vec<Process> {
        vec![
            Process::new("A", "alpha", 0, 5, 3, 0),
            Process::new("B", "beta", 0, 4, 1, 1),
            Process::new("C", "gamma", 0, 2, 2, 2),
        ]
    }

    fn simulator(processes: Vec<Process>, quantum: Ticks) -> Simulator {
        Simulator::new(processes, SimulatorConfig::with_quantum(quantum).without_pacing()).unwrap()
    }

    fn waits(run: &AlgorithmRun) -> Vec<Ticks> {
        run.processes
            .iter()
            .map(|p| p.waiting_time.unwrap())
            .collect()
    }

    fn assert_mean(run: &AlgorithmRun, expected: f64) {
        match run.summary {
            Summary::MeanWaitingTime(mean) => assert!(
                (mean - expected).abs() < 0.01,
                "{}: mean {} != {}",
                run.algorithm,
                mean,
                expected
            ),
            other => panic!("unexpected summary {:?}", other),
        }
    }

    #[test]
    fn test_scenario_fcfs() {
        let run = simulator(scenario(), 2).run(Algorithm::Fcfs);
        assert_eq!(run.dispatch_order(), vec![0, 1, 2]);
        assert_eq!(waits(&run), vec![0, 5, 9]);
        assert_mean(&run, 4.67);
    }

    #[test]
    fn test_scenario_sjf() {
        let run = simulator(scenario(), 2).run(Algorithm::Sjf);
        assert_eq!(run.dispatch_order(), vec![2, 1, 0]);
        assert_eq!(waits(&run), vec![6, 2, 0]);
        assert_mean(&run, 2.67);
    }

    #[test]
    fn test_scenario_priority() {
        let run = simulator(scenario(), 2).run(Algorithm::Priority);
        assert_eq!(run.dispatch_order(), vec![1, 2, 0]);
        assert_eq!(waits(&run), vec![6, 0, 4]);
        assert_mean(&run, 3.33);
    }

    #[test]
    fn test_scenario_round_robin() {
        let run = simulator(scenario(), 2).run(Algorithm::RoundRobin);
        assert_eq!(run.dispatch_order(), vec![0, 1, 2, 0, 1, 0]);
        assert_eq!(waits(&run), vec![6, 6, 4]);
        assert_eq!(run.summary, Summary::TotalTurnaround(11));
        assert_eq!(run.total_turnaround(), 11);
        assert_eq!(run.final_clock, 11);
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let sim = simulator(scenario(), 2);
        let runs = sim.run_all();
        assert_eq!(
            runs.iter().map(|r| r.algorithm).collect::<Vec<_>>(),
            Algorithm::ALL.to_vec()
        );
        // The input set is untouched by any run
        for p in sim.processes() {
            assert_eq!(p.remaining_time, p.burst_time);
            assert!(p.start_time.is_none());
            assert!(!p.is_completed());
        }
    }

    #[test]
    fn test_runs_are_idempotent() {
        let processes = vec![
            Process::new("P0", "", 3, 4, 2, 0),
            Process::new("P1", "", 0, 3, 2, 1),
            Process::new("P2", "", 3, 4, 2, 2),
            Process::new("P3", "", 9, 1, 0, 3),
            Process::new("P4", "", 20, 2, 1, 4),
        ];
        let sim = simulator(processes, 3);
        for algorithm in Algorithm::ALL {
            let first = sim.run(algorithm);
            let second = sim.run(algorithm);
            assert_eq!(first.timeline, second.timeline);
            assert_eq!(first.summary, second.summary);
            assert_eq!(first.processes, second.processes);
        }
    }

    #[test]
    fn test_metric_invariants_hold_for_every_policy() {
        let processes = vec![
            Process::new("P0", "", 2, 7, 4, 0),
            Process::new("P1", "", 0, 1, 1, 1),
            Process::new("P2", "", 5, 3, 0, 2),
            Process::new("P3", "", 5, 2, 3, 3),
            Process::new("P4", "", 30, 4, 2, 4),
        ];
        let bursts: Ticks = processes.iter().map(|p| p.burst_time).sum();
        let sim = simulator(processes, 2);

        for run in sim.run_all() {
            for p in &run.processes {
                assert_eq!(p.remaining_time, 0);
                let completion = p.completion_time.unwrap();
                let start = p.start_time.unwrap();
                assert!(start >= p.arrival_time);
                assert!(completion >= p.arrival_time + p.burst_time);
            }
            assert_eq!(run.final_clock, bursts + run.idle_time());
            assert_eq!(run.final_clock, run.total_turnaround());

            let mut clock = 0;
            for interval in &run.timeline {
                assert_eq!(interval.start(), clock);
                assert!(!interval.is_empty());
                if run.algorithm == Algorithm::RoundRobin {
                    assert!(interval.process().is_none() || interval.len() <= 2);
                }
                clock = interval.end();
            }
        }
    }

    #[test]
    fn test_fcfs_order_matches_sort() {
        let processes = vec![
            Process::new("P0", "", 4, 1, 0, 0),
            Process::new("P1", "", 1, 1, 0, 1),
            Process::new("P2", "", 4, 1, 0, 2),
            Process::new("P3", "", 0, 1, 0, 3),
        ];
        let run = simulator(processes, 1).run(Algorithm::Fcfs);
        assert_eq!(run.dispatch_order(), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_empty_set_is_an_error() {
        let result = Simulator::new(vec![], SimulatorConfig::default());
        assert!(matches!(result, Err(SchedulerError::NoProcesses)));
    }

    #[test]
    fn test_capacity_and_quantum_checks() {
        let config = SimulatorConfig {
            max_processes: 2,
            ..SimulatorConfig::default()
        };
        let result = Simulator::new(scenario(), config);
        assert!(matches!(
            result,
            Err(SchedulerError::TooManyProcesses {
                count: 3,
                capacity: 2
            })
        ));

        let result = Simulator::new(scenario(), SimulatorConfig::with_quantum(0));
        assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));

        let zero_burst = vec![Process::new("Z", "", 0, 0, 0, 0)];
        let result = Simulator::new(zero_burst, SimulatorConfig::default());
        assert!(matches!(result, Err(SchedulerError::InvalidProcess { .. })));
    }

    #[test]
    fn test_clock_overflow_is_rejected() {
        let row = crate::ingest::parse_row("A,x,18446744073709551615,1,1", 0).unwrap();
        let result = Simulator::new(vec![row], SimulatorConfig::default());
        assert!(matches!(
            result,
            Err(SchedulerError::InvalidProcess { ref name, .. }) if name == "A"
        ));

        let bursts = vec![
            Process::new("A", "", 0, Ticks::MAX, 1, 0),
            Process::new("B", "", 0, 1, 1, 1),
        ];
        let result = Simulator::new(bursts, SimulatorConfig::default());
        assert!(matches!(
            result,
            Err(SchedulerError::InvalidProcess { ref name, .. }) if name == "B"
        ));
    }

    #[test]
    fn test_clock_may_reach_the_limit() {
        let late = vec![Process::new("A", "x", Ticks::MAX - 1, 1, 1, 0)];
        let sim = simulator(late, 2);
        for run in sim.run_all() {
            assert_eq!(run.final_clock, Ticks::MAX);
            assert_eq!(run.idle_time(), Ticks::MAX - 1);
            assert_eq!(waits(&run), vec![0]);
        }
    }

    #[test]
    fn test_new_resets_run_state() {
        let mut dirty = Process::new("A", "", 0, 3, 0, 0);
        dirty.execute(3);
        dirty.complete(3, 0);
        let sim = simulator(vec![dirty], 2);
        assert_eq!(sim.processes()[0].remaining_time, 3);
        assert!(!sim.processes()[0].is_completed());
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("cpusched-core-{}.csv", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "A,alpha,0,5,3").unwrap();
            writeln!(file, "bad row").unwrap();
            writeln!(file, "B,beta,0,4,1").unwrap();
            writeln!(file, "C,gamma,0,2,2").unwrap();
        }
        let sim = Simulator::from_path(&path, SimulatorConfig::default()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(sim.processes().len(), 3);
        assert_eq!(sim.processes()[2].original_order, 2);
    }

    #[test]
    fn test_from_path_unreadable() {
        let result = Simulator::from_path(
            Path::new("/no/such/dir/processes.csv"),
            SimulatorConfig::default(),
        );
        assert!(matches!(result, Err(SchedulerError::Ingest(_))));
    }

    #[test]
    fn test_from_path_all_rows_invalid() {
        let path = std::env::temp_dir().join(format!("cpusched-empty-{}.csv", std::process::id()));
        std::fs::write(&path, "name,description,arrival,burst,priority\n").unwrap();
        let result = Simulator::from_path(&path, SimulatorConfig::default());
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SchedulerError::NoProcesses)));
    }
}
