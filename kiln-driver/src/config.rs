//! Driver configuration
//!
//! Defines the retry budget and poll intervals used while driving a build.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Driver configuration
///
/// The defaults match the job server's expected pacing: one second between
/// retries of a failed call, two seconds between queue polls and five seconds
/// between run polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Budget applied to every remote call, independently per phase
    pub retry: RetryPolicy,

    /// How often to poll a queued build
    pub queue_poll_interval: Duration,

    /// How often to poll a running build
    pub run_poll_interval: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            queue_poll_interval: Duration::from_secs(2),
            run_poll_interval: Duration::from_secs(5),
        }
    }
}

impl DriverConfig {
    /// Creates configuration from environment variables
    ///
    /// Optional environment variables, falling back to defaults when unset or
    /// unparsable:
    /// - KILN_RETRY_ATTEMPTS (default: 10)
    /// - KILN_RETRY_DELAY (seconds, default: 1)
    /// - KILN_QUEUE_POLL_INTERVAL (seconds, default: 2)
    /// - KILN_RUN_POLL_INTERVAL (seconds, default: 5)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DriverConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seconds = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        let max_attempts = lookup("KILN_RETRY_ATTEMPTS")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.retry.max_attempts);

        Self {
            retry: RetryPolicy::new(
                max_attempts,
                seconds("KILN_RETRY_DELAY", defaults.retry.delay),
            ),
            queue_poll_interval: seconds("KILN_QUEUE_POLL_INTERVAL", defaults.queue_poll_interval),
            run_poll_interval: seconds("KILN_RUN_POLL_INTERVAL", defaults.run_poll_interval),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.retry.max_attempts == 0 {
            anyhow::bail!("retry attempts must be greater than 0");
        }

        if self.queue_poll_interval.is_zero() {
            anyhow::bail!("queue_poll_interval must be greater than 0");
        }

        if self.run_poll_interval.is_zero() {
            anyhow::bail!("run_poll_interval must be greater than 0");
        }

        Ok(())
    }
}
