use std::{future::Future, time::Duration};

use thiserror::Error;
use tokio::{sync::oneshot, time};
use tracing::{debug, warn};

use crate::{
    config::TokenConfig,
    testing::{done::Done, expect::AssertionFailure},
};

#[derive(Debug, Error)]
pub enum TestFailure {
    #[error("Assertion failed: {0}")]
    Assertion(#[from] AssertionFailure),

    #[error("Timed out after {0:?} waiting for completion")]
    TimedOut(Duration),

    #[error("Completion signal dropped without being called")]
    SignalDropped,
}

/// Per-test timeout from `TEST_TIMEOUT_MS`, falling back to the default
/// when the environment holds an invalid configuration
pub fn configured_timeout() -> Duration {
    match TokenConfig::from_env() {
        Ok(config) => config.test_timeout,
        Err(e) => {
            warn!("using default test timeout: {}", e);
            TokenConfig::default().test_timeout
        }
    }
}

/// Run a callback-style test body and wait for its [`Done`] signal.
///
/// `body` receives the completion signal and is expected to move it into the
/// asynchronous callback under test. The test is over when the signal fires,
/// when it is dropped, or when `timeout` elapses, whichever comes first.
pub async fn with_done<F>(timeout: Duration, body: F) -> Result<(), TestFailure>
where
    F: FnOnce(Done),
{
    let (sender, receiver) = oneshot::channel();
    body(Done::new(sender));

    match time::timeout(timeout, receiver).await {
        Ok(Ok(Ok(()))) => {
            debug!("test signalled completion");
            Ok(())
        }
        Ok(Ok(Err(failure))) => {
            debug!(%failure, "test signalled failure");
            Err(TestFailure::Assertion(failure))
        }
        Ok(Err(_)) => {
            warn!("completion signal dropped");
            Err(TestFailure::SignalDropped)
        }
        Err(_) => {
            warn!(?timeout, "test timed out");
            Err(TestFailure::TimedOut(timeout))
        }
    }
}

/// Run an async test body that reports its own outcome, bounded by `timeout`
pub async fn within<F>(timeout: Duration, body: F) -> Result<(), TestFailure>
where
    F: Future<Output = Result<(), AssertionFailure>>,
{
    match time::timeout(timeout, body).await {
        Ok(outcome) => Ok(outcome?),
        Err(_) => {
            warn!(?timeout, "test timed out");
            Err(TestFailure::TimedOut(timeout))
        }
    }
}
