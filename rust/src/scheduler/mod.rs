//! Scheduling engine.
//!
//! Four independent policies (FCFS, SJF, Priority, Round Robin), each run
//! against a private copy of the ingested process set. Runs are single
//! threaded and purely computational; pacing happens later, in the report.

mod core;
mod non_preemptive;
mod policy;
mod queue;
mod round_robin;
mod state;

pub use core::{AlgorithmRun, SchedulerError, Simulator};
pub use policy::Algorithm;
pub use queue::ReadyQueue;
pub use state::RunState;
