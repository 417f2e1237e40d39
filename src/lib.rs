//! CPU scheduling simulator.
//!
//! Simulates scheduling policies over a synthetic task set on a virtual
//! integer clock, producing an execution trace and per-task timing metrics
//! (waiting and turnaround time) so that policies can be compared.
//!
//! # Modules
//!
//! - **`models`**: domain types — [`Task`], [`ExecutionLog`],
//!   [`ExecutionRecord`]
//! - **`sim`**: simulation primitives — [`SimulationClock`],
//!   [`ContextSwitchManager`]
//! - **`queue`**: admission-filtered FIFO [`ReadyQueue`] with ranked
//!   selection policies
//! - **`scheduler`**: the four policies — [`RoundRobinScheduler`],
//!   [`SjfScheduler`], [`PriorityScheduler`], [`AdaptiveScheduler`] — plus
//!   run KPIs
//! - **`validation`**: task-set integrity checks
//! - **`workload`**: synthetic task-set generation
//!
//! # Architecture
//!
//! A driver owns a task list and a scheduler. [`Scheduler::run`] validates
//! the tasks, resets state, and drives one policy's loop to completion,
//! mutating the tasks in place and appending to the scheduler's own log;
//! the driver then reads the trace through [`Scheduler::execution_log`] and
//! the metrics straight off the tasks. Everything is single-threaded and
//! deterministic: one run owns one clock, one queue, and one log.
//!
//! ```
//! use schedsim::{RoundRobinScheduler, Scheduler, Task};
//!
//! let mut tasks = vec![
//!     Task::new("P1", 0, 8),
//!     Task::new("P2", 1, 4),
//! ];
//! let mut scheduler = RoundRobinScheduler::new(1, 2)?;
//! scheduler.run(&mut tasks)?;
//!
//! assert_eq!(scheduler.execution_log().makespan(), 16);
//! assert!(tasks.iter().all(|t| t.is_finished()));
//! # Ok::<(), schedsim::SimError>(())
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2015), "Modern Operating Systems", §2.4

pub mod error;
pub mod models;
pub mod queue;
pub mod scheduler;
pub mod sim;
pub mod validation;
pub mod workload;

pub use error::SimError;
pub use models::{ExecutionLog, ExecutionRecord, Task, TaskId};
pub use queue::ReadyQueue;
pub use scheduler::{
    AdaptiveScheduler, PriorityScheduler, RoundRobinScheduler, Scheduler, SimulationKpi,
    SjfScheduler,
};
pub use sim::{ContextSwitchManager, SimulationClock};
