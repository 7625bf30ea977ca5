//! Quota-aware retry for outbound API calls
//!
//! GitHub attaches a quota header triple (`x-ratelimit-remaining`,
//! `x-ratelimit-limit`, `x-ratelimit-reset`) to every response.
//! [`RateLimitGuard::execute`] runs a single call, inspects that triple and,
//! when the quota is exhausted, sleeps until the reset time and tries again.
//!
//! The guard is per call. It does not coordinate with other calls in flight,
//! so two concurrent calls can each observe the last unit of quota.

use crate::config::Config;
use crate::{GitHubMcpError, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default number of rate-limit retries per call
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default remaining/limit ratio under which a warning is logged
pub const DEFAULT_LOW_QUOTA_RATIO: f64 = 0.10;
/// Cap on the exponent of the fallback backoff
const MAX_BACKOFF_EXPONENT: u32 = 10;

/// Quota state read from a single response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitState {
    /// Requests left in the current window
    pub remaining: u64,
    /// Size of the window
    pub limit: u64,
    /// When the window resets; `None` if the header was missing or malformed
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitState {
    /// Build from raw header values
    ///
    /// Returns `None` unless both `remaining` and `limit` parse. The reset time
    /// is epoch seconds.
    pub fn from_header_values(
        remaining: Option<&str>,
        limit: Option<&str>,
        reset: Option<&str>,
    ) -> Option<Self> {
        let remaining = remaining?.trim().parse().ok()?;
        let limit = limit?.trim().parse().ok()?;
        let reset_at = reset
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
        Some(Self {
            remaining,
            limit,
            reset_at,
        })
    }

    /// No requests left in the window
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining quota is below `ratio` of the limit
    pub fn is_low(&self, ratio: f64) -> bool {
        self.limit > 0 && (self.remaining as f64 / self.limit as f64) < ratio
    }
}

/// Anything that may carry a quota header triple
pub trait QuotaReport {
    /// Quota observed on this response
    fn quota(&self) -> Option<&RateLimitState>;
}

/// Settings for [`RateLimitGuard`]
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitGuardConfig {
    /// Rate-limit retries per call; a call is attempted at most `max_retries + 1` times
    pub max_retries: u32,
    /// Remaining/limit ratio under which a low-quota warning is logged
    pub low_quota_ratio: f64,
}

impl Default for RateLimitGuardConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            low_quota_ratio: DEFAULT_LOW_QUOTA_RATIO,
        }
    }
}

/// Wraps a single outbound call with quota-aware retry
#[derive(Debug, Clone, Default)]
pub struct RateLimitGuard {
    config: RateLimitGuardConfig,
}

impl RateLimitGuard {
    /// Create a guard with custom configuration
    pub fn new(config: RateLimitGuardConfig) -> Self {
        Self { config }
    }

    /// Create a guard from the server configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(RateLimitGuardConfig {
            max_retries: config.max_retries,
            low_quota_ratio: config.low_quota_ratio,
        })
    }

    /// Current configuration
    pub fn config(&self) -> &RateLimitGuardConfig {
        &self.config
    }

    /// Run `call` until it succeeds with quota left, fails with a
    /// non-rate-limit error, or the retry budget is spent.
    ///
    /// A response reporting `remaining == 0`, or a [`GitHubMcpError::RateLimit`]
    /// error, triggers a sleep until the reset time (or `2^attempt` seconds
    /// when the reset time is unknown or already past) followed by a retry.
    /// Both the call and the sleep race `cancel`; cancellation always surfaces
    /// as [`GitHubMcpError::Cancelled`].
    pub async fn execute<T, F, Fut>(&self, cancel: &CancellationToken, mut call: F) -> Result<T>
    where
        T: QuotaReport,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_retries = self.config.max_retries;
        let mut last_condition = String::new();
        let mut last_reset = None;

        for attempt in 0..=max_retries {
            if cancel.is_cancelled() {
                return Err(GitHubMcpError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(GitHubMcpError::Cancelled),
                outcome = call() => outcome,
            };

            let reset_at = match outcome {
                Ok(response) => match response.quota() {
                    Some(quota) if quota.is_exhausted() => {
                        last_condition = format!("quota exhausted (0 of {} remaining)", quota.limit);
                        quota.reset_at
                    }
                    Some(quota) => {
                        if quota.is_low(self.config.low_quota_ratio) {
                            tracing::warn!(
                                "GitHub API quota running low: {} of {} requests remaining",
                                quota.remaining,
                                quota.limit
                            );
                        }
                        return Ok(response);
                    }
                    None => return Ok(response),
                },
                Err(GitHubMcpError::RateLimit { message, reset_at }) => {
                    last_condition = message;
                    reset_at
                }
                Err(other) => return Err(other),
            };
            last_reset = reset_at;

            if attempt == max_retries {
                break;
            }

            let wait = Self::sleep_duration(attempt, reset_at, Utc::now());
            tracing::warn!(
                "Rate limited ({}), retrying in {:?} (attempt {}/{})",
                last_condition,
                wait,
                attempt + 1,
                max_retries
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(GitHubMcpError::Cancelled),
                _ = tokio::time::sleep(wait) => {}
            }
        }

        Err(GitHubMcpError::RateLimit {
            message: format!(
                "max retries ({max_retries}) exceeded waiting for rate limit reset: {last_condition}"
            ),
            reset_at: last_reset,
        })
    }

    /// Time to wait before retry number `attempt + 1`
    ///
    /// Until `reset_at` when it lies in the future, `2^attempt` seconds otherwise.
    pub fn sleep_duration(
        attempt: u32,
        reset_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Duration {
        reset_at
            .and_then(|reset| (reset - now).to_std().ok())
            .filter(|wait| !wait.is_zero())
            .unwrap_or_else(|| Duration::from_secs(1 << attempt.min(MAX_BACKOFF_EXPONENT)))
    }
}
