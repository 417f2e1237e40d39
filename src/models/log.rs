//! Execution trace model.
//!
//! The log is an append-only, insertion-ordered record of execution slices.
//! It is the authoritative trace of a run: the schedule can be replayed from
//! it and the per-task slice durations reconstruct each burst.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A single execution slice: `name` held the CPU from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Task that executed.
    pub name: String,
    /// Slice start time.
    pub start: i64,
    /// Slice end time (`end >= start`).
    pub end: i64,
}

impl ExecutionRecord {
    /// Slice length in time units.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Append-only record of the execution slices of one simulation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionLog {
    records: Vec<ExecutionRecord>,
}

impl ExecutionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slice to the log.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidInterval`] if either endpoint is negative
    /// or `end < start`.
    pub fn append(&mut self, name: &str, start: i64, end: i64) -> Result<(), SimError> {
        if start < 0 || end < start {
            return Err(SimError::InvalidInterval {
                name: name.to_string(),
                start,
                end,
            });
        }
        self.records.push(ExecutionRecord {
            name: name.to_string(),
            start,
            end,
        });
        Ok(())
    }

    /// All recorded slices in insertion order.
    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    /// Task names in execution order, e.g. `["P1", "P2", "P1"]`.
    pub fn sequence(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Compact trace rendering, e.g. `"P1[0-3] -> P2[3-5] -> P1[5-8]"`.
    pub fn sequence_string(&self) -> String {
        self.records
            .iter()
            .map(|r| format!("{}[{}-{}]", r.name, r.start, r.end))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Slices belonging to one task, in execution order.
    pub fn slices_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ExecutionRecord> {
        self.records.iter().filter(move |r| r.name == name)
    }

    /// Latest end time across all slices, or 0 for an empty log.
    pub fn makespan(&self) -> i64 {
        self.records.iter().map(|r| r.end).max().unwrap_or(0)
    }

    /// Number of recorded slices.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no slices.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes all records. Used between independent runs.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> ExecutionLog {
        let mut log = ExecutionLog::new();
        log.append("P1", 0, 3).unwrap();
        log.append("P2", 3, 5).unwrap();
        log.append("P1", 5, 8).unwrap();
        log
    }

    #[test]
    fn test_insertion_order_preserved() {
        let log = sample_log();
        assert_eq!(log.sequence(), vec!["P1", "P2", "P1"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_invalid_intervals_rejected() {
        let mut log = ExecutionLog::new();
        assert!(matches!(
            log.append("P1", 5, 3),
            Err(SimError::InvalidInterval { .. })
        ));
        assert!(matches!(
            log.append("P1", -1, 3),
            Err(SimError::InvalidInterval { .. })
        ));
        assert!(log.is_empty());
    }

    #[test]
    fn test_zero_length_slice_allowed() {
        let mut log = ExecutionLog::new();
        log.append("P1", 4, 4).unwrap();
        assert_eq!(log.records()[0].duration(), 0);
    }

    #[test]
    fn test_sequence_string() {
        let log = sample_log();
        assert_eq!(log.sequence_string(), "P1[0-3] -> P2[3-5] -> P1[5-8]");
        assert_eq!(ExecutionLog::new().sequence_string(), "");
    }

    #[test]
    fn test_slices_for() {
        let log = sample_log();
        let durations: i64 = log.slices_for("P1").map(|r| r.duration()).sum();
        assert_eq!(durations, 6);
        assert_eq!(log.slices_for("P3").count(), 0);
    }

    #[test]
    fn test_makespan_and_clear() {
        let mut log = sample_log();
        assert_eq!(log.makespan(), 8);
        log.clear();
        assert_eq!(log.makespan(), 0);
        assert!(log.is_empty());
    }
}
