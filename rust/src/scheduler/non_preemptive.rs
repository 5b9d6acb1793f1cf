//! FCFS, SJF and Priority: run-to-completion policies.

use rustc_hash::FxHashSet;

use crate::log_checks;
use crate::models::Process;

use super::policy::Algorithm;
use super::state::RunState;

/// First-Come-First-Served: one sort, then dispatch in that fixed order.
pub(super) fn run_fcfs(processes: &mut [Process], state: &mut RunState) {
    let mut order: Vec<usize> = (0..processes.len()).collect();
    order.sort_by(|&a, &b| Algorithm::Fcfs.compare(&processes[a], &processes[b]));

    for slot in order {
        let process = &mut processes[slot];
        state.idle_until(process.arrival_time);
        state.run_to_completion(slot, process);
    }
}

/// Selection loop shared by SJF and Priority.
///
/// At each step the best arrived, unfinished process under `algorithm` runs
/// to completion. If nothing has arrived yet, the clock jumps to the next
/// arrival instead.
pub(super) fn run_selection(
    algorithm: Algorithm,
    processes: &mut [Process],
    state: &mut RunState,
    verbosity: u8,
) {
    debug_assert!(!algorithm.is_preemptive());
    let mut pending: FxHashSet<usize> = (0..processes.len()).collect();

    while !pending.is_empty() {
        let now = state.now();
        let chosen = pending
            .iter()
            .copied()
            .filter(|&slot| processes[slot].has_arrived(now))
            .min_by(|&a, &b| algorithm.compare(&processes[a], &processes[b]));

        match chosen {
            Some(slot) => {
                log_checks!(
                    verbosity,
                    "{} picks {} at t={} ({} pending)",
                    algorithm,
                    processes[slot].name,
                    now,
                    pending.len()
                );
                state.run_to_completion(slot, &mut processes[slot]);
                pending.remove(&slot);
            }
            None => {
                let next_arrival = pending
                    .iter()
                    .map(|&slot| processes[slot].arrival_time)
                    .min();
                match next_arrival {
                    Some(next) => state.idle_until(next),
                    None => break,
                }
            }
        }
    }
}
