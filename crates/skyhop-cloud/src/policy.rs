//! Polling cadence configuration

use std::time::Duration;

/// Poll cadence and attempt budget for a single waiting call.
///
/// Passed explicitly into every wait instead of living in process-wide
/// constants, so tests can inject zero-delay policies.
#[derive(Debug, Clone)]
pub struct PollingPolicy {
    /// Sleep between consecutive status checks.
    pub interval: Duration,

    /// Attempt ceiling. `None` polls until a terminal status; the
    /// provider guarantees operations eventually reach one.
    pub max_attempts: Option<u32>,
}

impl PollingPolicy {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    /// Default cadence for provider operations: 2s, unbounded.
    pub const fn operation() -> Self {
        Self::new(Duration::from_secs(2))
    }

    /// Default cadence for readiness checks: 2s, 80 attempts (~160s ceiling).
    pub const fn readiness() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: Some(80),
        }
    }

    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self::operation()
    }
}
