use std::future::Future;
use std::time::Duration;

use crate::RestyleError;

/// Exponential-backoff settings for retrying transient remote failures.
#[derive(Clone, Debug, PartialEq)]
pub struct BackoffPolicy {
    pub initial_delay: Duration,
    pub exponential_base: f64,
    pub jitter: bool,
    /// Total attempt budget, counting the first call.
    pub max_retries: usize,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            exponential_base: 2.0,
            jitter: true,
            max_retries: 10,
        }
    }
}

impl BackoffPolicy {
    /// A base below 1 would make the delay shrink instead of grow.
    pub fn validate(&self) -> Result<(), RestyleError> {
        if self.exponential_base < 1.0 {
            return Err(RestyleError::InvalidConfig(format!(
                "backoff must increase, exponential base {} is below 1",
                self.exponential_base
            )));
        }
        Ok(())
    }
}

/// Invokes `op` until it succeeds, fails with a non-transient error, or the
/// attempt budget runs out. Only errors matched by `is_transient` are retried;
/// everything else propagates immediately.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &BackoffPolicy,
    is_transient: impl Fn(&RestyleError) -> bool,
    mut op: F,
) -> Result<T, RestyleError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RestyleError>>,
{
    policy.validate()?;
    if policy.max_retries == 0 {
        return Err(RestyleError::RetriesExhausted { max: 0 });
    }

    let mut delay = policy.initial_delay;
    let mut attempts = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if is_transient(&err) => {
                attempts += 1;
                if attempts >= policy.max_retries {
                    return Err(RestyleError::RetriesExhausted {
                        max: policy.max_retries,
                    });
                }
                let factor = if policy.jitter {
                    policy.exponential_base * (1.0 + rand::random::<f64>())
                } else {
                    policy.exponential_base
                };
                delay = delay.mul_f64(factor);
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
