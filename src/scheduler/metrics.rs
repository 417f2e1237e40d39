//! Run quality metrics (KPIs).
//!
//! Computes standard scheduling performance indicators from a completed
//! run's execution log and its task set.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest slice end time |
//! | Avg Waiting | mean(turnaround - burst) |
//! | Avg Turnaround | mean(completion - arrival) |
//! | CPU Utilization | executed time / makespan |
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", §5.2

use crate::models::{ExecutionLog, Task};

/// Performance indicators for one completed run.
#[derive(Debug, Clone)]
pub struct SimulationKpi {
    /// Latest slice end time.
    pub makespan: i64,
    /// Mean waiting time across all tasks.
    pub avg_waiting: f64,
    /// Mean turnaround time across all tasks.
    pub avg_turnaround: f64,
    /// Fraction of the makespan spent executing (the rest is context
    /// switches and idle gaps). 0.0 for an empty run.
    pub cpu_utilization: f64,
}

impl SimulationKpi {
    /// Computes KPIs from a run's log and its task set.
    pub fn calculate(log: &ExecutionLog, tasks: &[Task]) -> Self {
        let makespan = log.makespan();
        let busy: i64 = log.records().iter().map(|r| r.duration()).sum();

        let (avg_waiting, avg_turnaround) = if tasks.is_empty() {
            (0.0, 0.0)
        } else {
            let total_waiting: i64 = tasks.iter().map(|t| t.waiting).sum();
            let total_turnaround: i64 = tasks.iter().map(|t| t.turnaround).sum();
            (
                total_waiting as f64 / tasks.len() as f64,
                total_turnaround as f64 / tasks.len() as f64,
            )
        };

        let cpu_utilization = if makespan > 0 {
            busy as f64 / makespan as f64
        } else {
            0.0
        };

        Self {
            makespan,
            avg_waiting,
            avg_turnaround,
            cpu_utilization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{RoundRobinScheduler, Scheduler};

    #[test]
    fn test_kpi_from_a_round_robin_run() {
        let mut tasks = vec![
            Task::new("P1", 0, 8),
            Task::new("P2", 1, 4),
            Task::new("P3", 2, 2),
            Task::new("P4", 3, 1),
            Task::new("P5", 4, 3),
        ];
        let mut scheduler = RoundRobinScheduler::new(1, 2).unwrap();
        scheduler.run(&mut tasks).unwrap();

        let kpi = SimulationKpi::calculate(scheduler.execution_log(), &tasks);
        assert!((kpi.avg_waiting - 12.6).abs() < 1e-10);
        assert!((kpi.avg_turnaround - 16.2).abs() < 1e-10);
        assert_eq!(kpi.makespan, 27);
        // 18 executed units over a 27-unit makespan
        assert!((kpi.cpu_utilization - 18.0 / 27.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty_run() {
        let kpi = SimulationKpi::calculate(&ExecutionLog::new(), &[]);
        assert_eq!(kpi.makespan, 0);
        assert!((kpi.avg_waiting).abs() < 1e-10);
        assert!((kpi.cpu_utilization).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_single_task_is_fully_utilized() {
        let mut tasks = vec![Task::new("P1", 0, 5)];
        let mut scheduler = RoundRobinScheduler::new(3, 2).unwrap();
        scheduler.run(&mut tasks).unwrap();
        let kpi = SimulationKpi::calculate(scheduler.execution_log(), &tasks);
        assert_eq!(kpi.makespan, 5);
        assert!((kpi.cpu_utilization - 1.0).abs() < 1e-10);
    }
}
