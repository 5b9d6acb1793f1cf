//! Preemptive Round Robin with a fixed quantum.
//!
//! Arrivals are admitted to the ready queue exactly once. After every slice
//! the newly arrived processes and, if unfinished, the preempted one form a
//! batch that is sorted by `original_order` before being queued. A fresh
//! arrival with a lower order therefore lands ahead of the process that was
//! just preempted.

use rustc_hash::FxHashSet;

use crate::models::{Process, Ticks};
use crate::{log_checks, log_debug};

use super::queue::ReadyQueue;
use super::state::RunState;

/// Mark and return every not-yet-admitted process that has arrived by
/// `now`, in ascending slot order.
fn admit_arrivals(
    processes: &[Process],
    admitted: &mut FxHashSet<usize>,
    now: Ticks,
) -> Vec<usize> {
    let arrived: Vec<usize> = (0..processes.len())
        .filter(|slot| !admitted.contains(slot) && processes[*slot].has_arrived(now))
        .collect();
    admitted.extend(arrived.iter().copied());
    arrived
}

pub(super) fn run_round_robin(
    processes: &mut [Process],
    quantum: Ticks,
    state: &mut RunState,
    verbosity: u8,
) {
    debug_assert!(quantum > 0, "quantum must be positive");
    let total = processes.len();
    let mut queue = ReadyQueue::with_capacity(total);
    let mut admitted: FxHashSet<usize> = FxHashSet::default();
    let mut completed = 0;

    for slot in admit_arrivals(processes, &mut admitted, state.now()) {
        queue.enqueue(slot);
    }

    while completed < total {
        let Some(current) = queue.dequeue() else {
            // CPU idle: jump to the next arrival and admit everything due by then
            let next_arrival = (0..total)
                .filter(|slot| !admitted.contains(slot))
                .map(|slot| processes[slot].arrival_time)
                .min();
            let Some(next) = next_arrival else {
                break;
            };
            state.idle_until(next);
            for slot in admit_arrivals(processes, &mut admitted, state.now()) {
                queue.enqueue(slot);
            }
            continue;
        };

        let end = state.run_slice(current, &mut processes[current], quantum);
        let mut batch = admit_arrivals(processes, &mut admitted, end);

        let process = &mut processes[current];
        if process.remaining_time > 0 {
            batch.push(current);
        } else {
            let waiting = end - process.arrival_time - process.burst_time;
            process.complete(end, waiting);
            completed += 1;
            log_checks!(
                verbosity,
                "{} completed at {} (waited {})",
                process.name,
                end,
                waiting
            );
        }

        batch.sort_by_key(|&slot| processes[slot].original_order);
        log_debug!(verbosity, "re-queue batch {:?}", batch);
        for slot in batch {
            queue.enqueue(slot);
        }
        log_debug!(
            verbosity,
            "ready queue {:?}",
            queue.iter().collect::<Vec<_>>()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Interval;

    fn p(name: &str, arrival: u64, burst: u64, order: usize) -> Process {
        Process::new(name, "", arrival, burst, 0, order)
    }

    fn run(processes: &mut [Process], quantum: Ticks) -> RunState {
        let mut state = RunState::new(0);
        run_round_robin(processes, quantum, &mut state, 0);
        state
    }

    fn slices(state: &RunState) -> Vec<(usize, Ticks, Ticks)> {
        state
            .timeline()
            .iter()
            .filter_map(|interval| match *interval {
                Interval::Running {
                    start,
                    end,
                    process,
                } => Some((process, start, end)),
                Interval::Idle { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_rotation_with_simultaneous_arrivals() {
        let mut processes = vec![p("A", 0, 5, 0), p("B", 0, 4, 1), p("C", 0, 2, 2)];
        let state = run(&mut processes, 2);

        assert_eq!(
            slices(&state),
            vec![
                (0, 0, 2),
                (1, 2, 4),
                (2, 4, 6),
                (0, 6, 8),
                (1, 8, 10),
                (0, 10, 11)
            ]
        );
        assert_eq!(processes[2].waiting_time, Some(4));
        assert_eq!(processes[1].waiting_time, Some(6));
        assert_eq!(processes[0].waiting_time, Some(6));
        assert_eq!(state.now(), 11);
    }

    #[test]
    fn test_new_arrival_with_lower_order_overtakes_preempted() {
        // B (order 0) arrives at 2, exactly when A (order 1) is preempted.
        let mut processes = vec![p("B", 2, 2, 0), p("A", 0, 4, 1)];
        let state = run(&mut processes, 2);
        assert_eq!(slices(&state), vec![(1, 0, 2), (0, 2, 4), (1, 4, 6)]);
        assert_eq!(processes[0].waiting_time, Some(0));
        assert_eq!(processes[1].waiting_time, Some(2));
    }

    #[test]
    fn test_new_arrival_with_higher_order_waits_behind_preempted() {
        let mut processes = vec![p("A", 0, 4, 0), p("B", 1, 2, 1)];
        let state = run(&mut processes, 2);
        assert_eq!(slices(&state), vec![(0, 0, 2), (0, 2, 4), (1, 4, 6)]);
        assert_eq!(processes[1].waiting_time, Some(3));
    }

    #[test]
    fn test_idle_gap_admits_in_slot_order() {
        let mut processes = vec![p("A", 0, 1, 0), p("C", 5, 1, 1), p("B", 5, 1, 2)];
        let state = run(&mut processes, 3);
        assert_eq!(state.timeline()[1], Interval::Idle { start: 1, end: 5 });
        assert_eq!(slices(&state), vec![(0, 0, 1), (1, 5, 6), (2, 6, 7)]);
        assert_eq!(state.now(), 7);
    }

    #[test]
    fn test_late_start_with_leading_idle() {
        let mut processes = vec![p("A", 3, 3, 0)];
        let state = run(&mut processes, 2);
        assert_eq!(state.timeline()[0], Interval::Idle { start: 0, end: 3 });
        assert_eq!(slices(&state), vec![(0, 3, 5), (0, 5, 6)]);
        assert_eq!(processes[0].start_time, Some(3));
        assert_eq!(processes[0].waiting_time, Some(0));
    }

    #[test]
    fn test_lone_process_dispatch_count() {
        for (burst, quantum) in [(7, 3), (6, 3), (1, 4), (9, 1)] {
            let mut processes = vec![p("A", 0, burst, 0)];
            let state = run(&mut processes, quantum);
            let runs = slices(&state);
            assert_eq!(runs.len() as u64, burst.div_ceil(quantum));
            assert!(runs.iter().all(|&(_, s, e)| e - s <= quantum));
        }
    }

    #[test]
    fn test_final_clock_is_bursts_plus_idle() {
        let mut processes = vec![
            p("A", 0, 3, 0),
            p("B", 10, 4, 1),
            p("C", 11, 2, 2),
            p("D", 2, 5, 3),
        ];
        let state = run(&mut processes, 2);
        let bursts: Ticks = processes.iter().map(|p| p.burst_time).sum();
        let idle: Ticks = state
            .timeline()
            .iter()
            .filter(|i| i.process().is_none())
            .map(Interval::len)
            .sum();
        assert_eq!(state.now(), bursts + idle);
        assert!(processes.iter().all(Process::is_completed));
    }
}
