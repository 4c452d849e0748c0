//! Consecutive-failure circuit breaker for the remote tagger.

use tracing::info;

/// Consecutive failures that open the breaker unless configured otherwise.
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed { consecutive_failures: u32 },
    /// Terminal for the lifetime of the breaker.
    Open,
}

#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    state: BreakerState,
    threshold: u32,
}

impl CircuitBreaker {
    /// A closed breaker that opens after `threshold` consecutive failures.
    /// A threshold of zero is treated as one.
    pub fn new(threshold: u32) -> Self {
        Self {
            state: BreakerState::Closed {
                consecutive_failures: 0,
            },
            threshold: threshold.max(1),
        }
    }

    pub fn state(&self) -> BreakerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == BreakerState::Open
    }

    pub fn record_success(&mut self) {
        if let BreakerState::Closed { .. } = self.state {
            self.state = BreakerState::Closed {
                consecutive_failures: 0,
            };
        }
    }

    /// Count a failure. Returns `true` when this failure opened the breaker.
    pub fn record_failure(&mut self) -> bool {
        let BreakerState::Closed {
            consecutive_failures,
        } = self.state
        else {
            return false;
        };

        let failures = consecutive_failures + 1;
        if failures >= self.threshold {
            info!(failures, "Circuit breaker opened; remote tagging disabled");
            self.state = BreakerState::Open;
            true
        } else {
            self.state = BreakerState::Closed {
                consecutive_failures: failures,
            };
            false
        }
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_THRESHOLD)
    }
}
