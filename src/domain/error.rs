use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Empty user identifier")]
    EmptyUserIdentifier,

    #[error("Token encoding failed: {0}")]
    TokenEncoding(String),

    #[error("Token rejected: {0}")]
    InvalidToken(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timed out after {0:?} waiting for a token")]
    Timeout(Duration),

    #[error("Token task aborted: {0}")]
    TaskAborted(String),
}
