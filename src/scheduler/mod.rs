//! Scheduling policies.
//!
//! Every policy drives the same primitives — one clock, one ready queue, one
//! execution log, one context-switch manager — through a sequential loop
//! until every task has finished. They differ only in how the next task is
//! selected and when a running task is preempted:
//!
//! - **`RoundRobinScheduler`**: fixed quantum, FIFO rotation.
//! - **`SjfScheduler`**: preemptive shortest-remaining-time-first, tick
//!   granular.
//! - **`PriorityScheduler`**: preemptive priority with aging, tick granular.
//! - **`AdaptiveScheduler`**: hybrid policy that splits each quantum into
//!   FCFS, priority-check, and SJF-check phases with dynamic quantum growth.
//!
//! A run mutates the caller's tasks in place and appends to the scheduler's
//! own log; the caller keeps the task list and reads metrics from it
//! afterwards.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5

mod adaptive;
mod metrics;
mod priority;
mod round_robin;
mod sjf;

pub use adaptive::AdaptiveScheduler;
pub use metrics::SimulationKpi;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;

use crate::error::SimError;
use crate::models::{ExecutionLog, Task, TaskId};
use crate::validation;

/// A scheduling policy that can drive a task set to completion.
pub trait Scheduler {
    /// Runs the policy over `tasks`, mutating them in place.
    ///
    /// Validates the task set, resets per-task simulation state, the clock,
    /// and the log, then loops until every task has finished or no further
    /// progress is possible.
    ///
    /// # Errors
    /// [`SimError::InvalidTasks`] when the task set fails validation; other
    /// invalid-argument variants only if the run produces an impossible
    /// interval or delta, which a correct policy never does.
    fn run(&mut self, tasks: &mut [Task]) -> Result<(), SimError>;

    /// The execution trace of the most recent run.
    fn execution_log(&self) -> &ExecutionLog;
}

/// Validates and resets a task set, returning the not-yet-arrived pool
/// sorted by arrival time (stable, so equal arrivals keep input order).
pub(crate) fn prepare(tasks: &mut [Task]) -> Result<Vec<TaskId>, SimError> {
    validation::validate_tasks(tasks).map_err(SimError::InvalidTasks)?;
    for task in tasks.iter_mut() {
        task.reset_state();
    }
    let mut pending: Vec<TaskId> = (0..tasks.len()).collect();
    pending.sort_by_key(|&id| tasks[id].arrival);
    Ok(pending)
}
