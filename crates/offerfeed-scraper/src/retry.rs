//! Retry policy for feed fetches.
//!
//! The observed behaviour of the feed tool is "retry until HTTP 200, no
//! delay, forever". [`RetryPolicy::unbounded`] reproduces that and is the
//! default. Callers can bound the attempt count, add exponential backoff
//! and an overall deadline, and every wait is interruptible through a
//! [`CancelToken`].
//!
//! At this layer every non-200 status and every network failure (including
//! timeouts) is treated as transient. Only errors that can never succeed on
//! a later attempt (bad URL, client construction) stop the loop early.

use std::future::Future;
use std::time::Duration;

use offerfeed_core::RetrySettings;
use tokio::time::Instant;

use crate::cancel::CancelToken;
use crate::error::FeedError;

/// How often and how patiently a fetch is reissued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; `None` retries until success.
    max_attempts: Option<u32>,
    backoff_base: Duration,
    max_delay: Duration,
    deadline: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl RetryPolicy {
    const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

    /// Retry until success with no delay between attempts.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            backoff_base: Duration::ZERO,
            max_delay: Self::DEFAULT_MAX_DELAY,
            deadline: None,
        }
    }

    /// At most `max_attempts` attempts in total (at least one is always made).
    #[must_use]
    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts.max(1)),
            ..Self::unbounded()
        }
    }

    /// Exponential backoff: the wait after the n-th failure is
    /// `base * 2^(n-1)`, capped at `max_delay`, with ±25 % jitter.
    #[must_use]
    pub fn with_backoff(mut self, base: Duration, max_delay: Duration) -> Self {
        self.backoff_base = base;
        self.max_delay = max_delay;
        self
    }

    /// Gives up once `deadline` has elapsed since the first attempt started,
    /// even mid-request.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Builds a policy from configuration; `max_attempts == 0` means unbounded.
    #[must_use]
    pub fn from_settings(settings: &RetrySettings) -> Self {
        let mut policy = match settings.max_attempts {
            0 => Self::unbounded(),
            n => Self::bounded(n),
        };
        policy = policy.with_backoff(
            Duration::from_millis(settings.backoff_base_ms),
            Duration::from_millis(settings.max_delay_ms),
        );
        if let Some(secs) = settings.deadline_secs {
            policy = policy.with_deadline(Duration::from_secs(secs));
        }
        policy
    }

    #[must_use]
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Un-jittered wait after `failures` consecutive failed attempts.
    #[must_use]
    pub fn delay_for(&self, failures: u32) -> Duration {
        if self.backoff_base.is_zero() || failures == 0 {
            return Duration::ZERO;
        }
        let factor = 1u32 << (failures - 1).min(20);
        self.backoff_base
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Returns `true` when a later attempt could plausibly succeed.
pub(crate) fn is_retriable(err: &FeedError) -> bool {
    match err {
        FeedError::Http(e) => !e.is_builder(),
        FeedError::UnexpectedStatus { .. } => true,
        FeedError::InvalidUrl { .. }
        | FeedError::ClientBuild { .. }
        | FeedError::RetriesExhausted { .. }
        | FeedError::DeadlineExceeded { .. }
        | FeedError::Cancelled { .. } => false,
    }
}

fn jittered(delay: Duration) -> Duration {
    if delay.is_zero() {
        return delay;
    }
    delay.mul_f64(rand::random::<f64>() * 0.5 + 0.75)
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Runs `operation` until it succeeds or `policy` says stop.
///
/// `operation` receives the 1-based attempt number. Cancellation and the
/// deadline are checked while an attempt is in flight and while waiting
/// between attempts.
///
/// # Errors
///
/// - Any non-retriable error from `operation`, unchanged.
/// - [`FeedError::RetriesExhausted`] when the attempt budget is used up.
/// - [`FeedError::DeadlineExceeded`] when the policy deadline passes.
/// - [`FeedError::Cancelled`] when `cancel` fires.
pub(crate) async fn retry_until_success<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancelToken,
    mut operation: F,
) -> Result<T, FeedError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let deadline_at = policy.deadline.map(|d| Instant::now() + d);
    let deadline_secs = policy.deadline.map_or(0, |d| d.as_secs());
    let mut attempt = 0u32;

    loop {
        if cancel.is_cancelled() {
            return Err(FeedError::Cancelled { attempts: attempt });
        }
        attempt = attempt.saturating_add(1);

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(FeedError::Cancelled { attempts: attempt });
            }
            () = sleep_until_deadline(deadline_at) => {
                return Err(FeedError::DeadlineExceeded { attempts: attempt, deadline_secs });
            }
            result = operation(attempt) => result,
        };

        let err = match outcome {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retriable(&err) {
            return Err(err);
        }
        if policy.max_attempts.is_some_and(|max| attempt >= max) {
            return Err(FeedError::RetriesExhausted {
                attempts: attempt,
                last: Box::new(err),
            });
        }

        let delay = jittered(policy.delay_for(attempt));
        #[allow(clippy::cast_possible_truncation)]
        let delay_ms = delay.as_millis() as u64;
        tracing::warn!(attempt, delay_ms, error = %err, "feed fetch failed, retrying");

        if !delay.is_zero() {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    return Err(FeedError::Cancelled { attempts: attempt });
                }
                () = sleep_until_deadline(deadline_at) => {
                    return Err(FeedError::DeadlineExceeded { attempts: attempt, deadline_secs });
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}
