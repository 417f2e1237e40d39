//! Input validation for task sets.
//!
//! Checks structural integrity of a task list before a run. Detects:
//! - Duplicate or empty names
//! - Negative arrival, burst, priority, or quantum values
//!
//! Schedulers run these checks at the top of `run` and fail fast; nothing is
//! clamped or repaired.

use std::collections::HashSet;
use std::fmt;

use crate::models::Task;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same name.
    DuplicateName,
    /// A task has an empty name.
    EmptyName,
    /// A task arrives before the epoch.
    NegativeArrival,
    /// A task requires negative CPU time.
    NegativeBurst,
    /// A task has a negative priority number.
    NegativePriority,
    /// A task has a negative quantum allotment.
    NegativeQuantum,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a task set for a simulation run.
///
/// Checks:
/// 1. Every task has a non-empty name, unique within the set
/// 2. Arrival, burst, priority, and quantum are all non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for task in tasks {
        if task.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "task with empty name",
            ));
        } else if !names.insert(task.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("duplicate task name: {}", task.name),
            ));
        }

        if task.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("task '{}' has negative arrival {}", task.name, task.arrival),
            ));
        }
        if task.burst < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeBurst,
                format!("task '{}' has negative burst {}", task.name, task.burst),
            ));
        }
        if task.priority < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePriority,
                format!(
                    "task '{}' has negative priority {}",
                    task.name, task.priority
                ),
            ));
        }
        if task.quantum < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeQuantum,
                format!("task '{}' has negative quantum {}", task.name, task.quantum),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
