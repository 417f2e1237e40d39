//! Round-robin scheduling.
//!
//! # Algorithm
//!
//! Fixed, run-wide quantum. The ready queue rotates in FIFO order: the head
//! task executes for up to one quantum, then either finishes or goes to the
//! back of the queue. While a task is the only runnable one it keeps the CPU
//! across quantum boundaries as a single merged slice — handing the CPU back
//! to yourself costs nothing. A context switch is charged after a slice
//! exactly when another dispatch will follow; the CPU idling up to the next
//! arrival is never charged.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", §5.3.4

use tracing::{debug, trace};

use super::{prepare, Scheduler};
use crate::error::SimError;
use crate::models::{ExecutionLog, Task};
use crate::queue::ReadyQueue;
use crate::sim::{ContextSwitchManager, SimulationClock};

/// Round-robin scheduler with a fixed time quantum.
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    clock: SimulationClock,
    switch: ContextSwitchManager,
    log: ExecutionLog,
    quantum: i64,
}

impl RoundRobinScheduler {
    /// Creates a round-robin scheduler.
    ///
    /// # Errors
    /// [`SimError::NegativeContextSwitch`] for a negative switch delay,
    /// [`SimError::InvalidQuantum`] for a quantum below 1 — a zero quantum
    /// can never make progress.
    pub fn new(context_switch: i64, quantum: i64) -> Result<Self, SimError> {
        if quantum < 1 {
            return Err(SimError::InvalidQuantum(quantum));
        }
        Ok(Self {
            clock: SimulationClock::new(),
            switch: ContextSwitchManager::new(context_switch)?,
            log: ExecutionLog::new(),
            quantum,
        })
    }

    /// The run-wide quantum.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }
}

impl Scheduler for RoundRobinScheduler {
    fn run(&mut self, tasks: &mut [Task]) -> Result<(), SimError> {
        let mut pending = prepare(tasks)?;
        self.clock.reset();
        self.log.clear();
        let mut queue = ReadyQueue::new();
        debug!(tasks = tasks.len(), quantum = self.quantum, "round-robin run");

        loop {
            let now = self.clock.now();
            queue.admit_arrived(&mut pending, tasks, now);

            let Some(id) = queue.pop_front() else {
                let Some(&next) = pending.first() else {
                    break;
                };
                trace!(until = tasks[next].arrival, "cpu idle");
                self.clock.advance(tasks[next].arrival - now)?;
                continue;
            };

            let start = self.clock.now();
            loop {
                let step = self.quantum.min(tasks[id].remaining);
                tasks[id].remaining -= step;
                self.clock.advance(step)?;
                queue.admit_arrived(&mut pending, tasks, self.clock.now());
                if tasks[id].is_finished() || !queue.is_empty() {
                    break;
                }
                // Sole runnable task: grant another quantum within this slice
            }
            let end = self.clock.now();
            self.log.append(&tasks[id].name, start, end)?;

            if tasks[id].is_finished() {
                tasks[id].complete_at(end);
                trace!(task = %tasks[id].name, completion = end, "finished");
            } else {
                queue.admit(id, tasks, end);
            }

            if !queue.is_empty() || !pending.is_empty() {
                self.switch.apply(&mut self.clock)?;
            }
        }
        Ok(())
    }

    fn execution_log(&self) -> &ExecutionLog {
        &self.log
    }
}
