//! Task (process record) model.
//!
//! A task is the unit of scheduling: a name, a handful of immutable inputs
//! (arrival, burst, priority, initial quantum) and the mutable state a
//! scheduler drives to completion.
//!
//! # Time Representation
//! All times are abstract integer units relative to the run's epoch (t=0).
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Index of a task within the slice handed to a scheduler's `run`.
pub type TaskId = usize;

/// A schedulable task.
///
/// The five input fields are fixed for the life of the task; everything else
/// is simulation state, reset by [`Task::reset_state`] at the start of each
/// run and mutated only by the scheduler currently responsible for the task.
///
/// Once `remaining` reaches zero the completion metrics hold:
/// `turnaround == completion - arrival` and `waiting == turnaround - burst`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Task name, unique within a run.
    pub name: String,
    /// Time the task becomes available for scheduling.
    pub arrival: i64,
    /// Total CPU time the task requires.
    pub burst: i64,
    /// Scheduling priority; a lower number means a higher priority.
    pub priority: i32,
    /// Initial time-quantum allotment (used by the adaptive policy).
    pub quantum: i64,

    /// CPU time still owed. Decreases monotonically to zero.
    #[serde(default)]
    pub remaining: i64,
    /// Effective priority; diverges from `priority` under aging.
    #[serde(default)]
    pub current_priority: i32,
    /// Effective quantum; diverges from `quantum` under the adaptive policy.
    #[serde(default)]
    pub current_quantum: i64,
    /// Time the task finished. Set exactly once, at completion.
    #[serde(default)]
    pub completion: i64,
    /// `turnaround - burst`. Set exactly once, at completion.
    #[serde(default)]
    pub waiting: i64,
    /// `completion - arrival`. Set exactly once, at completion.
    #[serde(default)]
    pub turnaround: i64,
    /// Every quantum value the task was granted, in order, terminated by a
    /// trailing `0` when the task finishes.
    #[serde(default)]
    pub quantum_history: Vec<i64>,
    /// Last time the task was serviced or aged. Aging bookkeeping only.
    #[serde(default)]
    pub last_service: i64,
    /// Whether the task has executed since it was last made active.
    #[serde(default)]
    pub executed: bool,
}

impl Task {
    /// Creates a task with priority 0 and quantum 0.
    pub fn new(name: impl Into<String>, arrival: i64, burst: i64) -> Self {
        let mut task = Self {
            name: name.into(),
            arrival,
            burst,
            priority: 0,
            quantum: 0,
            remaining: 0,
            current_priority: 0,
            current_quantum: 0,
            completion: 0,
            waiting: 0,
            turnaround: 0,
            quantum_history: Vec::new(),
            last_service: 0,
            executed: false,
        };
        task.reset_state();
        task
    }

    /// Sets the scheduling priority (lower = higher).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self.current_priority = priority;
        self
    }

    /// Sets the initial quantum allotment.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self.current_quantum = quantum;
        self
    }

    /// Whether the task has finished executing.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Restores the task to its pre-run state.
    pub fn reset_state(&mut self) {
        self.remaining = self.burst;
        self.current_priority = self.priority;
        self.current_quantum = self.quantum;
        self.completion = 0;
        self.waiting = 0;
        self.turnaround = 0;
        self.quantum_history.clear();
        self.last_service = self.arrival;
        self.executed = false;
    }

    /// Records completion at `now`, deriving turnaround and waiting time.
    pub(crate) fn complete_at(&mut self, now: i64) {
        self.completion = now;
        self.turnaround = now - self.arrival;
        self.waiting = self.turnaround - self.burst;
    }
}
