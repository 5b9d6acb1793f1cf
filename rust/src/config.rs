//! Configuration for a simulator run.

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::models::Ticks;
use crate::pacing::{NoPacing, Pacer, WallClock};
use crate::scheduler::SchedulerError;

/// Default upper bound on ingested processes.
pub const DEFAULT_MAX_PROCESSES: usize = 1000;

/// Settings shared by ingestion, the engine and the report.
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Round-Robin time slice in simulated units (must be positive)
    pub quantum: Ticks,
    /// Wall-clock milliseconds per simulated unit while printing; 0 disables pacing
    pub unit_millis: u64,
    /// Capacity bound on the process set
    pub max_processes: usize,
    /// Diagnostic verbosity (see `logging`)
    pub verbosity: u8,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            quantum: 2,
            unit_millis: 1000,
            max_processes: DEFAULT_MAX_PROCESSES,
            verbosity: 0,
        }
    }
}

impl SimulatorConfig {
    /// Config with the given quantum and defaults elsewhere.
    pub fn with_quantum(quantum: Ticks) -> Self {
        Self {
            quantum,
            ..Self::default()
        }
    }

    /// Same config with pacing turned off.
    pub fn without_pacing(mut self) -> Self {
        self.unit_millis = 0;
        self
    }

    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.quantum == 0 {
            return Err(SchedulerError::InvalidConfig(
                "quantum must be a positive integer".to_string(),
            ));
        }
        if self.max_processes == 0 {
            return Err(SchedulerError::InvalidConfig(
                "max_processes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Pacer matching `unit_millis`.
    pub fn pacer(&self) -> Box<dyn Pacer> {
        if self.unit_millis == 0 {
            Box::new(NoPacing)
        } else {
            Box::new(WallClock::from_millis(self.unit_millis))
        }
    }
}
