//! Core data types for the simulator.

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Simulated time, in abstract units.
pub type Ticks = u64;

/// A process to be scheduled, plus the run-state one algorithm mutates.
///
/// `original_order` is the position among successfully ingested rows. It is
/// the final tie-break key in every ordering and doubles as the record's
/// index inside a run's working copy.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    pub name: String,
    pub description: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    /// Lower value = more urgent.
    pub priority: i32,
    pub original_order: usize,

    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
}

impl Process {
    /// Create a record with fresh run-state.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: i32,
        original_order: usize,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arrival_time,
            burst_time,
            priority,
            original_order,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            waiting_time: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    pub fn has_arrived(&self, now: Ticks) -> bool {
        self.arrival_time <= now
    }

    /// Record the first dispatch. Later calls keep the original value.
    pub fn mark_started(&mut self, now: Ticks) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Consume up to `slice` units of remaining work, returning what was used.
    pub fn execute(&mut self, slice: Ticks) -> Ticks {
        let used = slice.min(self.remaining_time);
        self.remaining_time -= used;
        used
    }

    /// Mark the process finished at `now` with the given waiting time.
    pub fn complete(&mut self, now: Ticks, waiting_time: Ticks) {
        debug_assert_eq!(
            self.remaining_time, 0,
            "process {} completed with work left",
            self.name
        );
        debug_assert!(
            self.completion_time.is_none(),
            "process {} completed twice",
            self.name
        );
        self.completion_time = Some(now);
        self.waiting_time = Some(waiting_time);
    }

    /// Completion minus arrival, once completed.
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion_time.map(|c| c - self.arrival_time)
    }
}

/// One entry of an execution timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interval {
    /// No process was eligible.
    Idle { start: Ticks, end: Ticks },
    /// `process` (an `original_order`) held the CPU.
    Running {
        start: Ticks,
        end: Ticks,
        process: usize,
    },
}

impl Interval {
    pub fn start(&self) -> Ticks {
        match *self {
            Self::Idle { start, .. } | Self::Running { start, .. } => start,
        }
    }

    pub fn end(&self) -> Ticks {
        match *self {
            Self::Idle { end, .. } | Self::Running { end, .. } => end,
        }
    }

    pub fn len(&self) -> Ticks {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The dispatched process, if this is a running interval.
    pub fn process(&self) -> Option<usize> {
        match *self {
            Self::Running { process, .. } => Some(process),
            Self::Idle { .. } => None,
        }
    }
}

/// The headline metric of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Summary {
    /// FCFS, SJF and Priority.
    MeanWaitingTime(f64),
    /// Round Robin: every idle and running interval, i.e. the final clock.
    TotalTurnaround(Ticks),
}
