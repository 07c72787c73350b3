//! Retrying round trips.
//!
//! [`Retry`] wraps any [`RoundTripper`] and consults a [`RetryPolicy`] after each
//! failed attempt. The provided policies only retry temporary transport errors;
//! a fault from the server is an answer and is returned as is.
use std::time::Duration;

use ironvim_soap::{Context, RoundTripper, SoapBody, SoapError};
use tracing::warn;

/// Decides whether attempt number `attempt` (starting at 1) that failed with
/// `error` is tried again, and after which delay.
pub trait RetryPolicy {
    fn should_retry(&self, error: &SoapError, attempt: u32) -> Option<Duration>;
}

impl<F> RetryPolicy for F
where
    F: Fn(&SoapError, u32) -> Option<Duration>,
{
    fn should_retry(&self, error: &SoapError, attempt: u32) -> Option<Duration> {
        self(error, attempt)
    }
}

/// Allows up to `attempts` attempts in total for temporary network errors, with
/// no delay between them.
pub fn temporary_network_error(attempts: u32) -> impl RetryPolicy + Send + Sync {
    move |error: &SoapError, attempt: u32| {
        (error.is_temporary() && attempt < attempts).then_some(Duration::ZERO)
    }
}

/// Like [`temporary_network_error`], waiting `backoff.delay(attempt)` between attempts.
pub fn with_backoff(attempts: u32, backoff: ExponentialBackoff) -> impl RetryPolicy + Send + Sync {
    move |error: &SoapError, attempt: u32| {
        (error.is_temporary() && attempt < attempts).then(|| backoff.delay(attempt))
    }
}

/// Exponential delays: `base^n * factor` milliseconds for the `n`-th wait.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialBackoff {
    base: u64,
    factor: u64,
    max_delay: Option<Duration>,
}

impl ExponentialBackoff {
    pub const fn from_millis(base: u64) -> Self {
        Self {
            base,
            factor: 1,
            max_delay: None,
        }
    }

    pub const fn factor(mut self, factor: u64) -> Self {
        self.factor = factor;
        self
    }

    pub const fn max_delay(mut self, duration: Duration) -> Self {
        self.max_delay = Some(duration);
        self
    }

    /// Delay before the wait numbered `n` (starting at 1). Saturates instead of
    /// overflowing.
    pub fn delay(&self, n: u32) -> Duration {
        let millis = self
            .base
            .checked_pow(n)
            .and_then(|value| value.checked_mul(self.factor))
            .unwrap_or(u64::MAX);
        let duration = Duration::from_millis(millis);

        match self.max_delay {
            Some(max_delay) if duration > max_delay => max_delay,
            _ => duration,
        }
    }
}

/// A [`RoundTripper`] that repeats failed round trips as its policy allows.
pub struct Retry<R> {
    inner: R,
    policy: Box<dyn RetryPolicy + Send + Sync>,
}

impl<R> Retry<R> {
    pub fn new(inner: R, policy: impl RetryPolicy + Send + Sync + 'static) -> Self {
        Self {
            inner,
            policy: Box::new(policy),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for Retry<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retry").field("inner", &self.inner).finish_non_exhaustive()
    }
}

impl<R: RoundTripper> RoundTripper for Retry<R> {
    fn round_trip(
        &self,
        ctx: &Context,
        req: &dyn SoapBody,
        res: &mut dyn SoapBody,
    ) -> Result<(), SoapError> {
        let mut attempt = 0;
        loop {
            ctx.check()?;
            attempt += 1;
            res.clear();

            let error = match self.inner.round_trip(ctx, req, res) {
                Ok(()) => return Ok(()),
                Err(error) => error,
            };

            let Some(delay) = self.policy.should_retry(&error, attempt) else {
                return Err(error);
            };

            warn!(
                operation = req.operation(),
                attempt,
                ?delay,
                %error,
                "retrying round trip"
            );
            crate::sleep(ctx, delay)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_exponentially() {
        let backoff = ExponentialBackoff::from_millis(2).factor(50);
        assert_eq!(backoff.delay(1), Duration::from_millis(100));
        assert_eq!(backoff.delay(2), Duration::from_millis(200));
        assert_eq!(backoff.delay(3), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_is_capped() {
        let backoff = ExponentialBackoff::from_millis(10).max_delay(Duration::from_millis(500));
        assert_eq!(backoff.delay(2), Duration::from_millis(100));
        assert_eq!(backoff.delay(3), Duration::from_millis(500));
    }

    #[test]
    fn test_backoff_saturates() {
        let backoff = ExponentialBackoff::from_millis(u64::MAX - 1);
        assert_eq!(backoff.delay(2), Duration::from_millis(u64::MAX));
    }
}
