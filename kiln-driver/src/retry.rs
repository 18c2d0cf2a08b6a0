//! Bounded retry
//!
//! Every remote call the driver makes goes through [`retry`]. A call is
//! attempted up to `max_attempts` times with a fixed delay between attempts.
//! Each invocation starts with a fresh budget, so a poll loop that calls
//! `retry` once per poll resets the budget on every successful poll.

use kiln_client::ClientError;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::{DriverError, Phase};

/// Retry budget for a single remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(1))
    }
}

/// Runs `op` until it succeeds, fails fatally or exhausts the policy
///
/// Only errors for which [`ClientError::is_transient`] holds are retried.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, phase: Phase, mut op: F) -> Result<T, DriverError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("{} succeeded after {} attempt(s)", phase, attempt);
                }
                return Ok(value);
            }
            Err(e) if !e.is_transient() => {
                error!("{} failed permanently: {}", phase, e);
                return Err(DriverError::Fatal { phase, source: e });
            }
            Err(e) => {
                if attempt >= policy.max_attempts {
                    error!("{} failed after {} attempts", phase, attempt);
                    return Err(DriverError::RetriesExhausted {
                        phase,
                        attempts: attempt,
                        source: e,
                    });
                }

                warn!(
                    "{} failed (attempt {}/{}): {}",
                    phase, attempt, policy.max_attempts, e
                );

                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    fn flaky(calls: &Cell<u32>, failures: u32) -> impl Future<Output = Result<u32, ClientError>> {
        calls.set(calls.get() + 1);
        let call = calls.get();
        async move {
            if call <= failures {
                Err(ClientError::api_error(503, "unavailable"))
            } else {
                Ok(call)
            }
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.delay, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_succeeds() {
        let calls = Cell::new(0);
        let start = Instant::now();

        let value = retry(&RetryPolicy::default(), Phase::Submission, || flaky(&calls, 0))
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_last_attempt() {
        let calls = Cell::new(0);
        let start = Instant::now();

        let value = retry(&RetryPolicy::default(), Phase::Submission, || flaky(&calls, 9))
            .await
            .unwrap();

        assert_eq!(value, 10);
        assert_eq!(start.elapsed(), Duration::from_secs(9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_budget() {
        let calls = Cell::new(0);

        let err = retry(&RetryPolicy::default(), Phase::RunWait, || flaky(&calls, 10))
            .await
            .unwrap_err();

        assert_eq!(calls.get(), 10);
        match err {
            DriverError::RetriesExhausted {
                phase, attempts, ..
            } => {
                assert_eq!(phase, Phase::RunWait);
                assert_eq!(attempts, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_is_not_retried() {
        let calls = Cell::new(0);

        let err = retry(&RetryPolicy::default(), Phase::QueueWait, || {
            calls.set(calls.get() + 1);
            async { Err::<(), _>(ClientError::InvalidResponse("no number".into())) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.get(), 1);
        assert!(matches!(err, DriverError::Fatal { phase: Phase::QueueWait, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_policy() {
        let calls = Cell::new(0);
        let start = Instant::now();
        let policy = RetryPolicy::new(3, Duration::from_millis(250));

        let err = retry(&policy, Phase::Submission, || flaky(&calls, 5))
            .await
            .unwrap_err();

        assert_eq!(calls.get(), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(500));
        assert!(matches!(err, DriverError::RetriesExhausted { attempts: 3, .. }));
    }
}
