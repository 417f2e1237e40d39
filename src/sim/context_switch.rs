//! Context-switch accounting.

use super::SimulationClock;
use crate::error::SimError;

/// Applies a fixed context-switch delay to a [`SimulationClock`].
///
/// Schedulers charge the delay whenever the CPU is handed to a different
/// task than the previous dispatch — never on the first dispatch of a run
/// and never while the CPU idles waiting for an arrival.
#[derive(Debug, Clone)]
pub struct ContextSwitchManager {
    delay: i64,
}

impl ContextSwitchManager {
    /// Creates a manager with the given delay.
    ///
    /// # Errors
    /// Returns [`SimError::NegativeContextSwitch`] if `delay` is negative.
    pub fn new(delay: i64) -> Result<Self, SimError> {
        if delay < 0 {
            return Err(SimError::NegativeContextSwitch(delay));
        }
        Ok(Self { delay })
    }

    /// Configured delay in time units.
    #[inline]
    pub fn delay(&self) -> i64 {
        self.delay
    }

    /// Charges the configured delay to the clock.
    pub fn apply(&self, clock: &mut SimulationClock) -> Result<(), SimError> {
        clock.advance(self.delay)
    }

    /// Charges `override_delay` instead of the configured delay.
    ///
    /// # Errors
    /// Returns [`SimError::NegativeContextSwitch`] if `override_delay` is
    /// negative.
    pub fn apply_with(
        &self,
        clock: &mut SimulationClock,
        override_delay: i64,
    ) -> Result<(), SimError> {
        if override_delay < 0 {
            return Err(SimError::NegativeContextSwitch(override_delay));
        }
        clock.advance(override_delay)
    }
}
