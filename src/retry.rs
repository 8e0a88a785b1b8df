use crate::error::{ClaimerError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// `None` retries until the operation succeeds or fails terminally.
    pub max_attempts: Option<u32>,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: None,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn new(
        max_attempts: Option<u32>,
        base_delay: Duration,
        max_delay: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
            backoff_multiplier,
        }
    }

    /// Immediate, unbounded retries.
    pub fn immediate() -> Self {
        Self::new(None, Duration::ZERO, Duration::ZERO, 1.0)
    }
}

/// Per-operation retry state. `Done` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Attempting { attempt: u32 },
    Done { attempts: u32 },
}

/// What a single attempt produced, as seen by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed,
}

impl RetryState {
    pub fn start() -> Self {
        RetryState::Attempting { attempt: 1 }
    }

    pub fn next(self, outcome: AttemptOutcome) -> Self {
        match (self, outcome) {
            (RetryState::Done { .. }, _) => self,
            (RetryState::Attempting { attempt }, AttemptOutcome::Succeeded) => {
                RetryState::Done { attempts: attempt }
            }
            (RetryState::Attempting { attempt }, AttemptOutcome::Failed) => {
                RetryState::Attempting {
                    attempt: attempt.saturating_add(1),
                }
            }
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, RetryState::Done { .. })
    }
}

/// Runs `operation` until it succeeds.
///
/// Retryable errors are logged and followed by an exponential backoff delay.
/// Terminal errors end the loop immediately and are returned unchanged. With a
/// finite `max_attempts` the last error is wrapped in
/// [`ClaimerError::RetriesExhausted`].
pub async fn execute_with_retry<F, Fut, T>(
    mut operation: F,
    retry_config: &RetryConfig,
    operation_name: &str,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut state = RetryState::start();

    while let RetryState::Attempting { attempt } = state {
        match operation().await {
            Ok(result) => {
                state = state.next(AttemptOutcome::Succeeded);
                info!(operation = operation_name, attempt, "✅ succeeded");
                debug_assert!(state.is_done());
                return Ok(result);
            }
            Err(e) if !e.is_retryable() => {
                error!(operation = operation_name, attempt, error = %e, "❌ failed with a terminal error");
                return Err(e);
            }
            Err(e) => {
                warn!(operation = operation_name, attempt, error = %e, "⚠️ attempt failed");

                if retry_config.max_attempts.is_some_and(|max| attempt >= max) {
                    error!(operation = operation_name, attempts = attempt, "❌ retry limit reached");
                    return Err(ClaimerError::RetriesExhausted {
                        operation: operation_name.to_string(),
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }

                let delay = calculate_delay(attempt, retry_config);
                if !delay.is_zero() {
                    info!(operation = operation_name, ?delay, "⏳ waiting before retry");
                    sleep(delay).await;
                }
                state = state.next(AttemptOutcome::Failed);
            }
        }
    }

    unreachable!("retry loop only exits through return")
}

pub fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
    let exponential_delay =
        config.base_delay.as_secs_f64() * config.backoff_multiplier.powi(exponent);

    let delay_seconds = exponential_delay.min(config.max_delay.as_secs_f64());
    if delay_seconds.is_finite() && delay_seconds > 0.0 {
        Duration::from_secs_f64(delay_seconds)
    } else {
        Duration::ZERO
    }
}
