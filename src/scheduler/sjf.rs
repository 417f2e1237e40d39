//! Preemptive shortest-remaining-time-first scheduling.
//!
//! # Algorithm
//!
//! Tick-granular loop. Each tick admits arrivals, then compares the best
//! queued task (smallest remaining time, ties broken by arrival then
//! priority number) against the running one: a strictly shorter challenger
//! preempts, anything else leaves the CPU alone. The running task executes
//! one unit; arrivals landing on the tick are admitted before the next
//! comparison. Continuing the same task never costs a context switch —
//! only handing the CPU to a different task does.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", §5.3.2

use tracing::{debug, trace};

use super::{prepare, Scheduler};
use crate::error::SimError;
use crate::models::{ExecutionLog, Task, TaskId};
use crate::queue::ReadyQueue;
use crate::sim::{ContextSwitchManager, SimulationClock};

/// Preemptive shortest-remaining-time-first scheduler.
///
/// Per-task quantum values are ignored; selection is recomputed each tick.
#[derive(Debug, Clone)]
pub struct SjfScheduler {
    clock: SimulationClock,
    switch: ContextSwitchManager,
    log: ExecutionLog,
}

impl SjfScheduler {
    /// Creates an SRTF scheduler.
    ///
    /// # Errors
    /// [`SimError::NegativeContextSwitch`] for a negative switch delay.
    pub fn new(context_switch: i64) -> Result<Self, SimError> {
        Ok(Self {
            clock: SimulationClock::new(),
            switch: ContextSwitchManager::new(context_switch)?,
            log: ExecutionLog::new(),
        })
    }
}

impl Scheduler for SjfScheduler {
    fn run(&mut self, tasks: &mut [Task]) -> Result<(), SimError> {
        let mut pending = prepare(tasks)?;
        self.clock.reset();
        self.log.clear();
        let mut queue = ReadyQueue::new();
        let mut active: Option<TaskId> = None;
        let mut last_ran: Option<TaskId> = None;
        let mut slice_start = 0;
        debug!(tasks = tasks.len(), "srtf run");

        loop {
            let now = self.clock.now();
            queue.admit_arrived(&mut pending, tasks, now);

            let current = match active {
                Some(current) => match queue.peek_shortest_remaining(tasks) {
                    Some(best) if tasks[best].remaining < tasks[current].remaining => {
                        trace!(
                            preempted = %tasks[current].name,
                            by = %tasks[best].name,
                            at = now,
                            "srtf preemption"
                        );
                        self.log.append(&tasks[current].name, slice_start, now)?;
                        queue.admit(current, tasks, now);
                        self.switch.apply(&mut self.clock)?;
                        queue.remove(best);
                        slice_start = self.clock.now();
                        best
                    }
                    _ => current,
                },
                None => match queue.take_shortest_remaining(tasks) {
                    Some(next) => {
                        if last_ran.is_some_and(|prev| prev != next) {
                            self.switch.apply(&mut self.clock)?;
                        }
                        slice_start = self.clock.now();
                        next
                    }
                    None => {
                        let Some(&first) = pending.first() else {
                            break;
                        };
                        trace!(until = tasks[first].arrival, "cpu idle");
                        self.clock.advance(tasks[first].arrival - now)?;
                        continue;
                    }
                },
            };

            // One unit of execution; zero-burst tasks finish on the spot
            let step = tasks[current].remaining.min(1);
            tasks[current].remaining -= step;
            self.clock.advance(step)?;
            last_ran = Some(current);
            queue.admit_arrived(&mut pending, tasks, self.clock.now());

            if tasks[current].is_finished() {
                let end = self.clock.now();
                self.log.append(&tasks[current].name, slice_start, end)?;
                tasks[current].complete_at(end);
                active = None;
            } else {
                active = Some(current);
            }
        }
        Ok(())
    }

    fn execution_log(&self) -> &ExecutionLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, arrival: i64, burst: i64) -> Task {
        Task::new(name, arrival, burst)
    }

    fn run(context_switch: i64, tasks: &mut [Task]) -> SjfScheduler {
        let mut scheduler = SjfScheduler::new(context_switch).unwrap();
        scheduler.run(tasks).unwrap();
        scheduler
    }

    fn metrics(tasks: &[Task], name: &str) -> (i64, i64) {
        let t = tasks.iter().find(|t| t.name == name).unwrap();
        (t.waiting, t.turnaround)
    }

    #[test]
    fn test_single_task() {
        let mut tasks = vec![task("P1", 2, 5)];
        let scheduler = run(1, &mut tasks);
        assert_eq!(scheduler.execution_log().sequence_string(), "P1[2-7]");
        assert_eq!(metrics(&tasks, "P1"), (0, 5));
    }

    #[test]
    fn test_shorter_arrival_preempts() {
        let mut tasks = vec![
            task("P1", 0, 8),
            task("P2", 1, 4),
            task("P3", 2, 9),
            task("P4", 3, 5),
        ];
        let scheduler = run(1, &mut tasks);
        assert_eq!(
            scheduler.execution_log().sequence_string(),
            "P1[0-1] -> P2[2-6] -> P4[7-12] -> P1[13-20] -> P3[21-30]"
        );
        assert_eq!(metrics(&tasks, "P1"), (12, 20));
        assert_eq!(metrics(&tasks, "P2"), (1, 5));
        assert_eq!(metrics(&tasks, "P3"), (19, 28));
        assert_eq!(metrics(&tasks, "P4"), (4, 9));
    }

    #[test]
    fn test_equal_remaining_does_not_preempt() {
        // At t=2 both have 2 units left; the incumbent keeps the CPU
        let mut tasks = vec![task("P1", 0, 4), task("P2", 2, 2)];
        let scheduler = run(1, &mut tasks);
        assert_eq!(scheduler.execution_log().sequence_string(), "P1[0-4] -> P2[5-7]");
        assert_eq!(metrics(&tasks, "P2"), (3, 5));
    }

    #[test]
    fn test_idle_gap_before_late_arrival() {
        let mut tasks = vec![task("P1", 0, 2), task("P2", 5, 3)];
        let scheduler = run(1, &mut tasks);
        // Idle from 2 to 5 is free; the switch is charged when P2 dispatches
        assert_eq!(scheduler.execution_log().sequence_string(), "P1[0-2] -> P2[6-9]");
        assert_eq!(metrics(&tasks, "P2"), (1, 4));
    }

    #[test]
    fn test_zero_burst_task_completes_instantly() {
        let mut tasks = vec![task("P1", 0, 0)];
        let scheduler = run(1, &mut tasks);
        assert_eq!(scheduler.execution_log().sequence_string(), "P1[0-0]");
        assert_eq!(metrics(&tasks, "P1"), (0, 0));
    }

    #[test]
    fn test_continuing_same_task_charges_nothing() {
        // A lone task's slice stays unbroken across every tick
        let mut tasks = vec![task("P1", 0, 50)];
        let scheduler = run(3, &mut tasks);
        assert_eq!(scheduler.execution_log().len(), 1);
        assert_eq!(scheduler.execution_log().makespan(), 50);
    }
}
