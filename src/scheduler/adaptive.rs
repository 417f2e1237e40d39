//! Adaptive hybrid (AG) scheduling.
//!
//! # Algorithm
//!
//! Each dispatch of a task with quantum `Q` walks a three-phase state
//! machine, with `q1 = ceil(Q/4)` and the unspent budget tracked by
//! subtraction:
//!
//! 1. **FCFS**: execute `min(q1, remaining)` unconditionally.
//! 2. **Priority check** (evaluated once): a ready task with a strictly
//!    lower priority number preempts; the victim's quantum grows to
//!    `Q + ceil(budget/2)`. Otherwise execute another `q1` instalment.
//! 3. **SJF check**: a ready task with strictly less remaining time
//!    preempts; the victim's quantum grows to `Q + budget`. Otherwise the
//!    rest of the budget executes.
//!
//! Surviving all three phases without finishing grows the quantum by 2 and
//! sends the task to the back of the queue. Every quantum a task is granted
//! is appended to its history; finishing appends a terminating `0`.
//! Dispatch selection is plain FIFO, and the preemption scans resolve ties
//! by queue order, earliest admitted first. Preemption and exhaustion
//! charge a context switch; finishing does not.

use tracing::{debug, trace};

use super::{prepare, Scheduler};
use crate::error::SimError;
use crate::models::{ExecutionLog, Task, TaskId};
use crate::queue::ReadyQueue;
use crate::sim::{ContextSwitchManager, SimulationClock};

/// Adaptive hybrid scheduler with per-task dynamic quanta.
#[derive(Debug, Clone)]
pub struct AdaptiveScheduler {
    clock: SimulationClock,
    switch: ContextSwitchManager,
    log: ExecutionLog,
}

/// Ceiling division for non-negative operands.
fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

/// Best queued task with a strictly lower priority number than `current`,
/// scanning in queue order so ties keep the earliest admitted.
fn higher_priority_rival(queue: &ReadyQueue, tasks: &[Task], current: TaskId) -> Option<TaskId> {
    let mut best: Option<TaskId> = None;
    for id in queue.iter() {
        if tasks[id].priority < tasks[current].priority
            && best.map_or(true, |b| tasks[id].priority < tasks[b].priority)
        {
            best = Some(id);
        }
    }
    best
}

/// Best queued task with strictly less remaining time than `current`,
/// scanning in queue order so ties keep the earliest admitted.
fn shorter_rival(queue: &ReadyQueue, tasks: &[Task], current: TaskId) -> Option<TaskId> {
    let mut best: Option<TaskId> = None;
    for id in queue.iter() {
        if tasks[id].remaining < tasks[current].remaining
            && best.map_or(true, |b| tasks[id].remaining < tasks[b].remaining)
        {
            best = Some(id);
        }
    }
    best
}

impl AdaptiveScheduler {
    /// Creates an adaptive scheduler.
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

    /// Hands the CPU from `current` to `winner` mid-dispatch, growing the
    /// victim's quantum to `grown`.
    fn preempt(
        &mut self,
        tasks: &mut [Task],
        queue: &mut ReadyQueue,
        current: TaskId,
        winner: TaskId,
        start: i64,
        grown: i64,
    ) -> Result<(), SimError> {
        trace!(
            preempted = %tasks[current].name,
            by = %tasks[winner].name,
            quantum = grown,
            "adaptive preemption"
        );
        tasks[current].current_quantum = grown;
        tasks[current].quantum_history.push(grown);
        self.log
            .append(&tasks[current].name, start, self.clock.now())?;
        self.switch.apply(&mut self.clock)?;
        queue.admit(current, tasks, self.clock.now());
        queue.remove(winner);
        Ok(())
    }

    /// Terminal transition: completion metrics, history terminator, slice.
    fn finish(&mut self, tasks: &mut [Task], id: TaskId, start: i64) -> Result<(), SimError> {
        let end = self.clock.now();
        tasks[id].complete_at(end);
        tasks[id].quantum_history.push(0);
        tasks[id].current_quantum = 0;
        self.log.append(&tasks[id].name, start, end)?;
        trace!(task = %tasks[id].name, completion = end, "finished");
        Ok(())
    }

    /// Executes up to `budget` units of `id`, returning the units spent.
    fn execute(&mut self, tasks: &mut [Task], id: TaskId, budget: i64) -> Result<i64, SimError> {
        let step = budget.min(tasks[id].remaining);
        tasks[id].remaining -= step;
        self.clock.advance(step)?;
        Ok(step)
    }
}

impl Scheduler for AdaptiveScheduler {
    fn run(&mut self, tasks: &mut [Task]) -> Result<(), SimError> {
        let mut pending = prepare(tasks)?;
        self.clock.reset();
        self.log.clear();
        let mut queue = ReadyQueue::new();
        let mut active: Option<TaskId> = None;
        debug!(tasks = tasks.len(), "adaptive run");

        loop {
            let now = self.clock.now();
            queue.admit_arrived(&mut pending, tasks, now);

            let current = match active.take() {
                Some(id) => id,
                None => match queue.pop_front() {
                    Some(id) => id,
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

            // One dispatch of `current`
            let start = self.clock.now();
            let quantum = tasks[current].current_quantum;
            let mut budget = quantum;
            if tasks[current].quantum_history.is_empty() {
                tasks[current].quantum_history.push(quantum);
            }
            let q1 = ceil_div(quantum, 4);

            // Phase 1: FCFS, non-preemptive
            budget -= self.execute(tasks, current, q1)?;
            if tasks[current].is_finished() {
                self.finish(tasks, current, start)?;
                continue;
            }
            queue.admit_arrived(&mut pending, tasks, self.clock.now());

            // Phase 2: priority check, then a second q1 instalment
            if let Some(winner) = higher_priority_rival(&queue, tasks, current) {
                let grown = quantum + ceil_div(budget, 2);
                self.preempt(tasks, &mut queue, current, winner, start, grown)?;
                active = Some(winner);
                continue;
            }
            budget -= self.execute(tasks, current, q1)?;
            if tasks[current].is_finished() {
                self.finish(tasks, current, start)?;
                continue;
            }
            queue.admit_arrived(&mut pending, tasks, self.clock.now());

            // Phase 3: SJF check, then the rest of the budget
            if let Some(winner) = shorter_rival(&queue, tasks, current) {
                let grown = quantum + budget;
                self.preempt(tasks, &mut queue, current, winner, start, grown)?;
                active = Some(winner);
                continue;
            }
            budget -= self.execute(tasks, current, budget)?;
            queue.admit_arrived(&mut pending, tasks, self.clock.now());
            if tasks[current].is_finished() {
                self.finish(tasks, current, start)?;
                continue;
            }

            if budget == 0 {
                // Quantum exhausted: grow by 2 and rotate out
                let grown = quantum + 2;
                tasks[current].current_quantum = grown;
                tasks[current].quantum_history.push(grown);
                self.log
                    .append(&tasks[current].name, start, self.clock.now())?;
                self.switch.apply(&mut self.clock)?;
                queue.admit(current, tasks, self.clock.now());
            }
        }
        Ok(())
    }

    fn execution_log(&self) -> &ExecutionLog {
        &self.log
    }
}
