pub mod client;
pub mod config;
pub mod http;
pub mod property;
pub mod retry;
pub mod session;
pub mod task;
mod vim;

use std::time::{Duration, Instant};

use ironvim_soap::{Context, SoapError};
use ironvim_vim25::types::{LocalizedMethodFault, ManagedObjectReference};

pub use client::SoapClient;
pub use config::ClientConfig;
pub use http::{HttpBuilder, HttpClient, HttpRequest, HttpResponse};
pub use property::Collector;
pub use retry::{ExponentialBackoff, Retry, RetryPolicy};
pub use session::SessionManager;
pub use task::TaskWaiter;
pub use vim::VimClient;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Soap(#[from] SoapError),

    #[error("task failed: {message}")]
    Task {
        message: String,
        fault: Option<LocalizedMethodFault>,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{obj} has no property {property}")]
    MissingProperty {
        obj: ManagedObjectReference,
        property: String,
    },

    #[error("unexpected value for {property}: expected {expected}, found {found}")]
    UnexpectedValue {
        property: String,
        expected: &'static str,
        found: String,
    },
}

impl ClientError {
    pub fn soap(&self) -> Option<&SoapError> {
        match self {
            Self::Soap(error) => Some(error),
            _ => None,
        }
    }
}

/// Sleeps for `delay`, waking early with an error when `ctx` is cancelled or expires.
///
/// A delay too large to represent as an instant sleeps until `ctx` ends it.
pub(crate) fn sleep(ctx: &Context, delay: Duration) -> Result<(), SoapError> {
    const SLICE: Duration = Duration::from_millis(50);

    let until = Instant::now().checked_add(delay);
    loop {
        ctx.check()?;
        let left = match until {
            Some(until) => until.saturating_duration_since(Instant::now()),
            None => SLICE,
        };
        if left.is_zero() {
            return Ok(());
        }
        std::thread::sleep(left.min(SLICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_returns_after_delay() {
        let started = Instant::now();
        sleep(&Context::background(), Duration::from_millis(20)).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_unbounded_sleep_ends_at_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_millis(100));
        let error = sleep(&ctx, Duration::from_millis(u64::MAX)).unwrap_err();
        assert!(matches!(error, SoapError::DeadlineExceeded));
    }

    #[test]
    fn test_unbounded_sleep_ends_on_cancel() {
        let ctx = Context::background();
        ctx.cancel();
        let error = sleep(&ctx, Duration::MAX).unwrap_err();
        assert!(matches!(error, SoapError::Cancelled));
    }
}
