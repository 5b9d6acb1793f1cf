//! Clock and timeline of a single algorithm run.

use crate::models::{Interval, Process, Ticks};
use crate::{log_checks, log_events};

/// Simulated clock plus the intervals it has advanced through.
///
/// The timeline always starts at 0 and is contiguous, so the final clock
/// equals the sum of all interval lengths.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    clock: Ticks,
    timeline: Vec<Interval>,
    verbosity: u8,
}

impl RunState {
    pub fn new(verbosity: u8) -> Self {
        Self {
            clock: 0,
            timeline: Vec::new(),
            verbosity,
        }
    }

    pub fn now(&self) -> Ticks {
        self.clock
    }

    pub fn timeline(&self) -> &[Interval] {
        &self.timeline
    }

    /// Advance to `until`, recording an idle interval. No-op if not ahead.
    pub fn idle_until(&mut self, until: Ticks) {
        if until <= self.clock {
            return;
        }
        log_events!(self.verbosity, "t={} idle until {}", self.clock, until);
        self.timeline.push(Interval::Idle {
            start: self.clock,
            end: until,
        });
        self.clock = until;
    }

    /// Give `process` (at index `slot` of the working copy) up to `slice`
    /// units of CPU. Returns the clock after the slice.
    pub fn run_slice(&mut self, slot: usize, process: &mut Process, slice: Ticks) -> Ticks {
        debug_assert!(
            process.has_arrived(self.clock),
            "{} dispatched before arrival",
            process.name
        );
        let start = self.clock;
        process.mark_started(start);
        let used = process.execute(slice);
        let end = start + used;

        log_events!(
            self.verbosity,
            "t={} dispatch {} for {} (remaining {})",
            start,
            process.name,
            used,
            process.remaining_time
        );
        self.timeline.push(Interval::Running {
            start,
            end,
            process: slot,
        });
        self.clock = end;
        end
    }

    /// Non-preemptive dispatch: run the whole burst and complete the process.
    pub fn run_to_completion(&mut self, slot: usize, process: &mut Process) {
        let dispatched_at = self.clock;
        let remaining = process.remaining_time;
        let end = self.run_slice(slot, process, remaining);
        let waiting = dispatched_at - process.arrival_time;
        process.complete(end, waiting);
        log_checks!(
            self.verbosity,
            "{} completed at {} (waited {})",
            process.name,
            end,
            waiting
        );
    }

    pub fn into_timeline(self) -> Vec<Interval> {
        self.timeline
    }
}
