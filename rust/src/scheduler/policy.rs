//! Scheduling policies and their shared tie-break chain.
//!
//! Every policy orders processes by its own primary key, then by
//! `arrival_time`, then by `original_order`. The chain is a total order, so
//! selection never depends on iteration order.

use std::cmp::Ordering;
use std::fmt;

use crate::models::Process;

/// The four simulated policies, in report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// First-Come-First-Served
    Fcfs,
    /// Shortest-Job-First, non-preemptive
    Sjf,
    /// Lowest priority value first, non-preemptive
    Priority,
    /// Fixed-quantum preemptive rotation
    RoundRobin,
}

impl Algorithm {
    /// Fixed execution and report order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// Display name used in the report banner.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "Priority",
            Self::RoundRobin => "Round Robin",
        }
    }

    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Compare two processes under this policy (`Less` = dispatch first).
    pub fn compare(&self, a: &Process, b: &Process) -> Ordering {
        let primary = match self {
            Self::Sjf => a.burst_time.cmp(&b.burst_time),
            Self::Priority => a.priority.cmp(&b.priority),
            Self::Fcfs | Self::RoundRobin => Ordering::Equal,
        };
        primary
            .then(a.arrival_time.cmp(&b.arrival_time))
            .then(a.original_order.cmp(&b.original_order))
    }

    /// Parse a policy name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "fcfs" => Some(Self::Fcfs),
            "sjf" => Some(Self::Sjf),
            "priority" => Some(Self::Priority),
            "rr" | "round-robin" | "round_robin" => Some(Self::RoundRobin),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
