use std::{fmt::Debug, future::Future};

use thiserror::Error;

use crate::domain::models::token::Token;

/// An assertion that did not hold, with the expected/actual pair for reporting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {actual}")]
pub struct AssertionFailure {
    pub expected: String,
    pub actual: String,
}

impl AssertionFailure {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Values that can be present or absent.
///
/// `None` is absent. An empty string or [`Token`] is treated as the placeholder
/// sentinel and counts as absent too, so `Some(Token::new(String::new()))` is
/// not defined.
pub trait Definable {
    fn is_defined(&self) -> bool;
}

impl Definable for Token {
    fn is_defined(&self) -> bool {
        Token::is_defined(self)
    }
}

impl Definable for String {
    fn is_defined(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Definable> Definable for Option<T> {
    fn is_defined(&self) -> bool {
        self.as_ref().is_some_and(Definable::is_defined)
    }
}

impl<T: Definable + ?Sized> Definable for &T {
    fn is_defined(&self) -> bool {
        (**self).is_defined()
    }
}

pub struct Expectation<'a, T: ?Sized> {
    actual: &'a T,
}

/// Start an assertion on a plain value
pub fn expect<T: ?Sized>(actual: &T) -> Expectation<'_, T> {
    Expectation { actual }
}

impl<T: Debug + ?Sized> Expectation<'_, T> {
    pub fn to_be<U>(self, expected: &U) -> Result<(), AssertionFailure>
    where
        T: PartialEq<U>,
        U: Debug + ?Sized,
    {
        if self.actual == expected {
            Ok(())
        } else {
            Err(AssertionFailure::new(
                format!("{:?}", expected),
                format!("{:?}", self.actual),
            ))
        }
    }

    pub fn to_be_defined(self) -> Result<(), AssertionFailure>
    where
        T: Definable,
    {
        if self.actual.is_defined() {
            Ok(())
        } else {
            Err(AssertionFailure::new(
                "a defined value",
                format!("{:?}", self.actual),
            ))
        }
    }

    pub fn to_satisfy<P>(self, description: &str, predicate: P) -> Result<(), AssertionFailure>
    where
        P: FnOnce(&T) -> bool,
    {
        if predicate(self.actual) {
            Ok(())
        } else {
            Err(AssertionFailure::new(
                description,
                format!("{:?}", self.actual),
            ))
        }
    }
}

impl<T: Debug> Expectation<'_, Option<T>> {
    pub fn to_be_none(self) -> Result<(), AssertionFailure> {
        match self.actual {
            None => Ok(()),
            Some(value) => Err(AssertionFailure::new("None", format!("Some({:?})", value))),
        }
    }
}

/// Start an assertion on the value a fallible future settles to
pub fn expect_future<F>(future: F) -> FutureExpectation<F> {
    FutureExpectation { future }
}

pub struct FutureExpectation<F> {
    future: F,
}

impl<F> FutureExpectation<F> {
    /// Assert on the value the future resolves to
    pub fn resolves(self) -> Resolves<F> {
        Resolves {
            future: self.future,
        }
    }

    /// Assert on the error the future rejects with
    pub fn rejects(self) -> Rejects<F> {
        Rejects {
            future: self.future,
        }
    }
}

pub struct Resolves<F> {
    future: F,
}

impl<F, T, E> Resolves<F>
where
    F: Future<Output = Result<T, E>>,
    T: Debug,
    E: Debug,
{
    async fn settle(self) -> Result<T, AssertionFailure> {
        self.future
            .await
            .map_err(|e| AssertionFailure::new("future to resolve", format!("rejected with {:?}", e)))
    }

    pub async fn to_be_defined(self) -> Result<(), AssertionFailure>
    where
        T: Definable,
    {
        let value = self.settle().await?;
        expect(&value).to_be_defined()
    }

    pub async fn to_be<U>(self, expected: &U) -> Result<(), AssertionFailure>
    where
        T: PartialEq<U>,
        U: Debug + ?Sized,
    {
        let value = self.settle().await?;
        expect(&value).to_be(expected)
    }
}

pub struct Rejects<F> {
    future: F,
}

impl<F, T, E> Rejects<F>
where
    F: Future<Output = Result<T, E>>,
    T: Debug,
    E: Debug,
{
    pub async fn to_satisfy<P>(self, description: &str, predicate: P) -> Result<(), AssertionFailure>
    where
        P: FnOnce(&E) -> bool,
    {
        match self.future.await {
            Ok(value) => Err(AssertionFailure::new(
                "future to reject",
                format!("resolved to {:?}", value),
            )),
            Err(e) => expect(&e).to_satisfy(description, predicate),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_to_be_defined_positive() {
        let token = Some(Token::new("abc".to_string()));
        assert_eq!(Ok(()), expect(&token).to_be_defined());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Token::new(String::new())))]
    fn test_to_be_defined_negative(#[case] token: Option<Token>) {
        let failure = expect(&token).to_be_defined().unwrap_err();
        assert_eq!("a defined value", failure.expected);
    }

    #[rstest]
    fn test_empty_string_is_not_defined_negative() {
        assert!(expect(&String::new()).to_be_defined().is_err());
        assert!(expect(&Some(String::new())).to_be_defined().is_err());
        assert_eq!(Ok(()), expect(&Some("x".to_string())).to_be_defined());
    }

    #[rstest]
    fn test_to_be_reports_mismatch_negative() {
        let failure = expect(&1).to_be(&2).unwrap_err();
        assert_eq!("2", failure.expected);
        assert_eq!("1", failure.actual);
        assert_eq!("expected 2, got 1", failure.to_string());
    }

    #[rstest]
    fn test_to_be_none_negative() {
        let failure = expect(&Some(3)).to_be_none().unwrap_err();
        assert_eq!("Some(3)", failure.actual);
    }

    #[rstest]
    #[tokio::test]
    async fn test_resolves_to_be_defined_positive() -> Result<(), AssertionFailure> {
        let settled = future::ready(Ok::<_, ()>("token".to_string()));
        expect_future(settled).resolves().to_be_defined().await
    }

    #[rstest]
    #[tokio::test]
    async fn test_resolves_on_rejected_future_negative() {
        let settled = future::ready(Err::<String, _>("boom"));
        let failure = expect_future(settled).resolves().to_be_defined().await.unwrap_err();
        assert_eq!("future to resolve", failure.expected);
        assert_eq!("rejected with \"boom\"", failure.actual);
    }

    #[rstest]
    #[tokio::test]
    async fn test_rejects_on_resolved_future_negative() {
        let settled = future::ready(Ok::<_, String>(7));
        let failure = expect_future(settled)
            .rejects()
            .to_satisfy("any error", |_| true)
            .await
            .unwrap_err();
        assert_eq!("resolved to 7", failure.actual);
    }
}
