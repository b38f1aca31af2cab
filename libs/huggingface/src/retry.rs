use std::time::Duration;

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_secs(5);

/// How often to retry and how long to wait in between.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: BACKOFF_BASE,
        }
    }
}

impl RetryPolicy {
    /// Linear backoff: one base delay after the first attempt, two after
    /// the second, and so on.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Progress of one bounded retry loop.
///
/// Idle -> Attempting -> BackingOff -> Attempting -> ... -> Succeeded | Failed
///
/// Transitions are pure; the client drives the machine with real requests
/// and sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryState {
    Idle,
    Attempting { attempt: u32 },
    BackingOff { attempt: u32, delay: Duration },
    Succeeded,
    Failed,
}

impl RetryState {
    pub fn begin(self) -> Self {
        match self {
            RetryState::Idle => RetryState::Attempting { attempt: 1 },
            other => other,
        }
    }

    /// The current attempt failed. Schedules a backoff while budget
    /// remains; the final attempt fails outright, no trailing sleep.
    pub fn retry(self, policy: &RetryPolicy) -> Self {
        match self {
            RetryState::Attempting { attempt } if attempt < policy.max_attempts => {
                RetryState::BackingOff {
                    attempt,
                    delay: policy.backoff_delay(attempt),
                }
            }
            RetryState::Attempting { .. } => RetryState::Failed,
            other => other,
        }
    }

    /// The backoff elapsed, move on to the next attempt.
    pub fn resume(self) -> Self {
        match self {
            RetryState::BackingOff { attempt, .. } => RetryState::Attempting {
                attempt: attempt + 1,
            },
            other => other,
        }
    }

    pub fn succeed(self) -> Self {
        match self {
            RetryState::Attempting { .. } => RetryState::Succeeded,
            other => other,
        }
    }
}
