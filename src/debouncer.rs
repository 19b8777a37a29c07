//! Trailing-edge debouncing for search requests
//!
//! Rapid successive triggers collapse into a single firing once the input
//! has been quiet for the configured delay.

use std::time::{Duration, Instant};

/// Default quiet period before a search fires
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Debouncer state
///
/// Time is passed in by the caller so the worker can drive it from the
/// async runtime's clock and tests can drive it deterministically.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    last_trigger: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_trigger: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a trigger, pushing the deadline out by a full delay
    pub fn trigger(&mut self, now: Instant) {
        self.last_trigger = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_trigger.is_some()
    }

    /// When the pending trigger will fire, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.last_trigger.map(|t| t + self.delay)
    }

    /// Fire if the quiet period has elapsed
    ///
    /// Returns true exactly once per burst of triggers.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.last_trigger = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending trigger without firing
    pub fn reset(&mut self) {
        self.last_trigger = None;
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
