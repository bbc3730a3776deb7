use async_trait::async_trait;

use crate::domain::{
    error::DomainError,
    models::{token::Token, user::UserIdentifier},
};

/// Service issuing tokens for a user
pub trait TokenGenerator: Send + Sync {
    fn generate(&self, user: &UserIdentifier) -> Result<Token, DomainError>;
}

/// Asynchronous counterpart of [`TokenGenerator`], settled on the runtime
#[async_trait]
pub trait AsyncTokenGenerator: Send + Sync {
    async fn generate_async(&self, user: &UserIdentifier) -> Result<Token, DomainError>;
}
