//! Retry policy for completion calls.
//!
//! The policy is an explicit value composed around the call site — no
//! implicit wrapping. `next_delay` draws each inter-attempt delay uniformly
//! at random from a window whose ceiling doubles per attempt up to
//! `max_delay`, so retries from concurrent callers do not synchronize.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use super::LlmError;

/// Total attempt budget for transient failures (initial call included).
pub const MAX_ATTEMPTS: u32 = 6;
/// Floor of the backoff window.
pub const BACKOFF_BASE: Duration = Duration::from_secs(30);
/// Ceiling of the backoff window.
pub const BACKOFF_MAX: Duration = Duration::from_secs(60);

/// Bounded-retry parameters: (attempt budget, base delay, max delay).
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: BACKOFF_BASE,
            max_delay: BACKOFF_MAX,
        }
    }
}

impl RetryPolicy {
    /// Delay inserted before re-attempt `attempt` (0-based: the sleep between
    /// the first failure and the second attempt is `next_delay(0)`).
    ///
    /// Uniform draw from `[base_delay, min(max_delay, base_delay * 2^attempt)]`.
    pub fn next_delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay.as_secs_f64();
        let ceiling = (base * 2f64.powi(attempt.min(32) as i32)).min(self.max_delay.as_secs_f64());
        if ceiling <= base {
            return self.base_delay;
        }
        Duration::from_secs_f64(rand::thread_rng().gen_range(base..=ceiling))
    }
}

/// Runs `op` under `policy`: transient failures sleep then re-attempt,
/// permanent failures propagate on the first attempt, and once the budget is
/// exhausted the last transient error propagates unmodified.
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut last_error: Option<LlmError> = None;

    for attempt in 0..policy.max_attempts {
        if attempt > 0 {
            let delay = policy.next_delay(attempt - 1);
            warn!(
                "Completion call attempt {} failed, retrying after {}s...",
                attempt,
                delay.as_secs()
            );
            tokio::time::sleep(delay).await;
        }

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                warn!("Transient completion failure: {e}");
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or(LlmError::RetriesExhausted {
        attempts: policy.max_attempts,
    }))
}
