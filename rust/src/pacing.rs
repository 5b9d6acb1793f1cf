//! Time simulation used to pace the report.
//!
//! A pacer blocks the caller for a number of simulated time units so the
//! trace appears to unfold in real time. It is purely cosmetic: pacing runs
//! while a finished run is replayed, so it cannot influence any metric.

use std::thread;
use std::time::Duration;

/// Blocking delay primitive.
pub trait Pacer {
    /// Block for `units` simulated time units. Zero or negative is a no-op.
    fn wait(&mut self, units: i64);
}

impl<P: Pacer + ?Sized> Pacer for Box<P> {
    fn wait(&mut self, units: i64) {
        (**self).wait(units)
    }
}

/// Sleeps the current thread for `units x unit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallClock {
    unit: Duration,
}

impl WallClock {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Total sleep for a given number of units, saturating on overflow.
    fn span(&self, units: i64) -> Duration {
        if units <= 0 {
            return Duration::ZERO;
        }
        let units = u32::try_from(units).unwrap_or(u32::MAX);
        self.unit.saturating_mul(units)
    }
}

impl Pacer for WallClock {
    fn wait(&mut self, units: i64) {
        let span = self.span(units);
        if !span.is_zero() {
            thread::sleep(span);
        }
    }
}

/// Advances nothing and returns immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn wait(&mut self, _units: i64) {}
}

/// Remembers every requested wait instead of sleeping.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingPacer {
    pub waits: Vec<i64>,
}

#[cfg(test)]
impl Pacer for RecordingPacer {
    fn wait(&mut self, units: i64) {
        self.waits.push(units);
    }
}
