use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use tokio::sync::oneshot;
use tracing::debug;

use crate::testing::expect::AssertionFailure;

pub type Outcome = Result<(), AssertionFailure>;

/// One-shot completion signal handed to a callback-style test body.
///
/// Every signalling method takes `self`, so a test can report its outcome
/// once and only once. Dropping `Done` without signalling is reported to the
/// runner as [`TestFailure::SignalDropped`](crate::testing::runner::TestFailure).
///
/// ```
/// use async_token::testing::Done;
///
/// fn signal_once(done: Done) {
///     done.done();
/// }
/// ```
///
/// Signalling a second time does not compile:
///
/// ```compile_fail
/// use async_token::testing::Done;
///
/// fn signal_twice(done: Done) {
///     done.done();
///     done.done();
/// }
/// ```
///
/// ```compile_fail
/// use async_token::testing::{Done, expect};
///
/// fn check_then_signal(done: Done, token: Option<String>) {
///     done.check(|| expect(&token).to_be_defined());
///     done.done();
/// }
/// ```
#[derive(Debug)]
pub struct Done {
    sender: oneshot::Sender<Outcome>,
}

impl Done {
    pub(crate) fn new(sender: oneshot::Sender<Outcome>) -> Self {
        Self { sender }
    }

    /// Signal that the test finished successfully
    pub fn done(self) {
        self.finish(Ok(()));
    }

    /// Signal that the test finished with `failure`
    pub fn fail(self, failure: AssertionFailure) {
        self.finish(Err(failure));
    }

    pub fn finish(self, outcome: Outcome) {
        if self.sender.send(outcome).is_err() {
            // runner already gave up (timed out)
            debug!("completion signal sent after the runner stopped waiting");
        }
    }

    /// Run `assertions` and signal their outcome.
    ///
    /// A panicking assertion (`assert!`, `assert_eq!`, ...) is caught and
    /// forwarded as a failure instead of unwinding through the callback.
    pub fn check<F>(self, assertions: F)
    where
        F: FnOnce() -> Outcome,
    {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(assertions)) {
            Ok(outcome) => outcome,
            Err(payload) => Err(AssertionFailure::new(
                "assertions to pass",
                format!("panicked: {}", panic_message(&*payload)),
            )),
        };
        self.finish(outcome);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}
