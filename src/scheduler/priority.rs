//! Preemptive priority scheduling with aging.
//!
//! # Algorithm
//!
//! Tick-granular loop over priority numbers where 1 is the best a task can
//! reach. Queued tasks age: every `aging_interval` units spent waiting since
//! they were last serviced buys one priority increment, floored at the
//! minimum, so long waits cannot starve a task forever. Each tick admits
//! arrivals, ages the queue, and then stabilizes the CPU: while the best
//! queued candidate strictly outranks the running task (lower priority
//! number, or equal priority and earlier arrival), the incumbent is logged,
//! re-enqueued, and replaced, paying one context switch per hand-off. The
//! survivor executes one unit.
//!
//! Queue selection orders full ties by name so equal tasks dispatch
//! reproducibly, but a name alone never forces a preemption.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", §5.3.3
//! (priority scheduling and starvation/aging)

use tracing::{debug, trace};

use super::{prepare, Scheduler};
use crate::error::SimError;
use crate::models::{ExecutionLog, Task, TaskId};
use crate::queue::ReadyQueue;
use crate::sim::{ContextSwitchManager, SimulationClock};

/// Preemptive priority scheduler with aging.
///
/// Per-task quantum values are ignored; selection is recomputed each tick.
#[derive(Debug, Clone)]
pub struct PriorityScheduler {
    clock: SimulationClock,
    switch: ContextSwitchManager,
    log: ExecutionLog,
    aging_interval: i64,
}

impl PriorityScheduler {
    /// Best (numerically lowest) priority a task can age to.
    pub const MIN_PRIORITY: i32 = 1;

    /// Creates a priority scheduler.
    ///
    /// # Errors
    /// [`SimError::NegativeContextSwitch`] for a negative switch delay,
    /// [`SimError::InvalidAgingInterval`] for an interval below 1.
    pub fn new(context_switch: i64, aging_interval: i64) -> Result<Self, SimError> {
        if aging_interval < 1 {
            return Err(SimError::InvalidAgingInterval(aging_interval));
        }
        Ok(Self {
            clock: SimulationClock::new(),
            switch: ContextSwitchManager::new(context_switch)?,
            log: ExecutionLog::new(),
            aging_interval,
        })
    }

    /// Ticks a waiting task must accumulate per priority increment.
    pub fn aging_interval(&self) -> i64 {
        self.aging_interval
    }

    /// Improves the priority of every queued task that has waited at least
    /// one full interval since it was last serviced.
    fn age_queue(&self, queue: &ReadyQueue, tasks: &mut [Task], now: i64) {
        for id in queue.iter() {
            let task = &mut tasks[id];
            if task.current_priority <= Self::MIN_PRIORITY {
                continue;
            }
            let increments = (now - task.last_service) / self.aging_interval;
            if increments > 0 {
                let headroom = i64::from(task.current_priority - Self::MIN_PRIORITY);
                task.current_priority -= increments.min(headroom) as i32;
                task.last_service = now;
                trace!(task = %task.name, priority = task.current_priority, "aged");
            }
        }
    }
}

/// Whether `challenger` strictly outranks `incumbent` for preemption.
fn outranks(challenger: &Task, incumbent: &Task) -> bool {
    challenger.current_priority < incumbent.current_priority
        || (challenger.current_priority == incumbent.current_priority
            && challenger.arrival < incumbent.arrival)
}

impl Scheduler for PriorityScheduler {
    fn run(&mut self, tasks: &mut [Task]) -> Result<(), SimError> {
        let mut pending = prepare(tasks)?;
        self.clock.reset();
        self.log.clear();
        let mut queue = ReadyQueue::new();
        let mut active: Option<TaskId> = None;
        let mut slice_start = 0;
        debug!(tasks = tasks.len(), interval = self.aging_interval, "priority run");

        loop {
            let now = self.clock.now();
            queue.admit_arrived(&mut pending, tasks, now);
            self.age_queue(&queue, tasks, now);

            let mut current = match active {
                Some(current) => current,
                None => match queue.take_best_priority(tasks) {
                    Some(next) => {
                        // Adopting onto an idle CPU is free
                        tasks[next].executed = false;
                        slice_start = now;
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

            // Stabilize: hand the CPU over while a queued task outranks the
            // running one. A hand-off can admit arrivals and age the queue,
            // so the check repeats against each new incumbent.
            while let Some(candidate) = queue.peek_best_priority(tasks) {
                if !outranks(&tasks[candidate], &tasks[current]) {
                    break;
                }
                let at = self.clock.now();
                trace!(
                    preempted = %tasks[current].name,
                    by = %tasks[candidate].name,
                    at,
                    "priority preemption"
                );
                // A never-executed activation has no slice to interrupt
                if at > slice_start {
                    self.log.append(&tasks[current].name, slice_start, at)?;
                }
                if tasks[current].executed {
                    tasks[current].last_service = at;
                }
                queue.admit(current, tasks, at);
                self.switch.apply(&mut self.clock)?;
                let resumed = self.clock.now();
                queue.admit_arrived(&mut pending, tasks, resumed);
                self.age_queue(&queue, tasks, resumed);
                queue.remove(candidate);
                tasks[candidate].executed = false;
                slice_start = resumed;
                current = candidate;
            }

            // One unit of execution; zero-burst tasks finish on the spot
            let step = tasks[current].remaining.min(1);
            tasks[current].remaining -= step;
            self.clock.advance(step)?;
            if step > 0 {
                tasks[current].executed = true;
            }
            queue.admit_arrived(&mut pending, tasks, self.clock.now());
            self.age_queue(&queue, tasks, self.clock.now());

            if tasks[current].is_finished() {
                let end = self.clock.now();
                self.log.append(&tasks[current].name, slice_start, end)?;
                tasks[current].complete_at(end);
                active = None;
                if !queue.is_empty() || !pending.is_empty() {
                    self.switch.apply(&mut self.clock)?;
                }
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

    fn task(name: &str, arrival: i64, burst: i64, priority: i32) -> Task {
        Task::new(name, arrival, burst).with_priority(priority)
    }

    fn run(context_switch: i64, interval: i64, tasks: &mut [Task]) -> PriorityScheduler {
        let mut scheduler = PriorityScheduler::new(context_switch, interval).unwrap();
        scheduler.run(tasks).unwrap();
        scheduler
    }

    fn metrics(tasks: &[Task], name: &str) -> (i64, i64) {
        let t = tasks.iter().find(|t| t.name == name).unwrap();
        (t.waiting, t.turnaround)
    }

    #[test]
    fn test_zero_aging_interval_rejected() {
        assert_eq!(
            PriorityScheduler::new(1, 0).unwrap_err(),
            SimError::InvalidAgingInterval(0)
        );
        assert_eq!(PriorityScheduler::new(1, 4).unwrap().aging_interval(), 4);
    }

    #[test]
    fn test_higher_priority_arrival_preempts() {
        let mut tasks = vec![
            task("P1", 0, 4, 3),
            task("P2", 1, 3, 1),
            task("P3", 2, 2, 2),
        ];
        let scheduler = run(0, 10, &mut tasks);
        assert_eq!(
            scheduler.execution_log().sequence_string(),
            "P1[0-1] -> P2[1-4] -> P3[4-6] -> P1[6-9]"
        );
        assert_eq!(metrics(&tasks, "P1"), (5, 9));
        assert_eq!(metrics(&tasks, "P2"), (0, 3));
        assert_eq!(metrics(&tasks, "P3"), (2, 4));
    }

    #[test]
    fn test_aging_promotes_a_waiting_task_into_the_cpu() {
        // P2 starts four priority levels behind and earns one level per two
        // waiting ticks; at t=7 it has aged past P1 and preempts it.
        let mut tasks = vec![task("P1", 0, 10, 4), task("P2", 1, 2, 6)];
        let scheduler = run(0, 2, &mut tasks);
        assert_eq!(
            scheduler.execution_log().sequence_string(),
            "P1[0-7] -> P2[7-9] -> P1[9-12]"
        );
        assert_eq!(metrics(&tasks, "P1"), (2, 12));
        assert_eq!(metrics(&tasks, "P2"), (6, 8));
    }

    #[test]
    fn test_aging_floors_at_the_minimum() {
        // P2 ages down to the minimum within two ticks but never outranks
        // P1, which already holds the minimum with an equal arrival
        let mut tasks = vec![task("P1", 0, 20, 1), task("P2", 0, 5, 3)];
        let scheduler = run(0, 1, &mut tasks);
        assert_eq!(
            scheduler.execution_log().sequence_string(),
            "P1[0-20] -> P2[20-25]"
        );
        let p2 = tasks.iter().find(|t| t.name == "P2").unwrap();
        assert_eq!(p2.current_priority, PriorityScheduler::MIN_PRIORITY);
    }

    #[test]
    fn test_full_tie_dispatches_lexicographically() {
        // Same priority, same arrival: the name decides who goes first, and
        // it never triggers a preemption afterwards
        let mut tasks = vec![task("P2", 0, 2, 1), task("P1", 0, 2, 1)];
        let scheduler = run(0, 10, &mut tasks);
        assert_eq!(
            scheduler.execution_log().sequence_string(),
            "P1[0-2] -> P2[2-4]"
        );
    }

    #[test]
    fn test_no_switch_after_the_final_task() {
        let mut tasks = vec![task("P1", 0, 3, 1)];
        let scheduler = run(5, 10, &mut tasks);
        assert_eq!(scheduler.execution_log().makespan(), 3);
    }

    #[test]
    fn test_switch_delay_separates_slices() {
        let mut tasks = vec![task("P1", 0, 4, 3), task("P2", 1, 3, 1)];
        let scheduler = run(2, 10, &mut tasks);
        // Preemption at t=1 charges 2 units before P2 resumes
        assert_eq!(
            scheduler.execution_log().sequence_string(),
            "P1[0-1] -> P2[3-6] -> P1[8-11]"
        );
        assert_eq!(metrics(&tasks, "P1"), (7, 11));
        assert_eq!(metrics(&tasks, "P2"), (2, 5));
    }
}
