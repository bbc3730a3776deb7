//! Harness for testing asynchronous code.
//!
//! Callback-style operations are driven through [`with_done`], whose body
//! receives a one-shot [`Done`] signal. Futures are asserted on either with
//! [`expect_future`] or by awaiting them and using [`expect`] on the value.

pub mod done;
pub mod expect;
pub mod runner;

pub use done::Done;
pub use expect::{AssertionFailure, Definable, expect, expect_future};
pub use runner::{TestFailure, configured_timeout, with_done, within};
