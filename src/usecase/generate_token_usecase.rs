use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::{
    error::DomainError,
    models::{token::Token, user::UserIdentifier},
    services::token_service::{AsyncTokenGenerator, TokenGenerator},
};

/// Deferred outcome of [`GenerateTokenUsecase::generate_token_promise`]
///
/// Generation starts as soon as the promise is created; awaiting it only
/// collects the result.
pub struct TokenPromise {
    handle: JoinHandle<Result<Token, DomainError>>,
}

impl Future for TokenPromise {
    type Output = Result<Token, DomainError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) => Err(DomainError::TaskAborted(e.to_string())),
        })
    }
}

/// Issues tokens asynchronously, either through a callback or a [`TokenPromise`].
///
/// Both entry points spawn onto the current tokio runtime and must be called
/// from within one.
pub struct GenerateTokenUsecase<T: TokenGenerator> {
    token_generator: Arc<T>,
    latency: Duration,
}

impl<T: TokenGenerator> Clone for GenerateTokenUsecase<T> {
    fn clone(&self) -> Self {
        Self {
            token_generator: Arc::clone(&self.token_generator),
            latency: self.latency,
        }
    }
}

impl<T: TokenGenerator + 'static> GenerateTokenUsecase<T> {
    pub fn new(token_generator: T) -> Self {
        Self::with_latency(token_generator, Duration::ZERO)
    }

    pub fn with_latency(token_generator: T, latency: Duration) -> Self {
        Self {
            token_generator: Arc::new(token_generator),
            latency,
        }
    }

    /// Generate a token and hand it to `callback` as `(error, token)`.
    ///
    /// Exactly one of the two arguments is `Some`. The callback runs on a
    /// runtime task, never on the caller's stack.
    pub fn generate_token<F>(&self, user_identifier: &str, callback: F)
    where
        F: FnOnce(Option<DomainError>, Option<Token>) + Send + 'static,
    {
        let generator = Arc::clone(&self.token_generator);
        let latency = self.latency;
        let user_identifier = user_identifier.to_string();

        tokio::spawn(async move {
            match issue(&*generator, &user_identifier, latency).await {
                Ok(token) => callback(None, Some(token)),
                Err(e) => callback(Some(e), None),
            }
        });
    }

    pub fn generate_token_promise(&self, user_identifier: &str) -> TokenPromise {
        let generator = Arc::clone(&self.token_generator);
        let latency = self.latency;
        let user_identifier = user_identifier.to_string();

        let handle =
            tokio::spawn(async move { issue(&*generator, &user_identifier, latency).await });
        TokenPromise { handle }
    }
}

#[async_trait]
impl<T: TokenGenerator + 'static> AsyncTokenGenerator for GenerateTokenUsecase<T> {
    async fn generate_async(&self, user: &UserIdentifier) -> Result<Token, DomainError> {
        self.generate_token_promise(user.as_str()).await
    }
}

async fn issue<T: TokenGenerator + ?Sized>(
    generator: &T,
    user_identifier: &str,
    latency: Duration,
) -> Result<Token, DomainError> {
    let user = match UserIdentifier::new(user_identifier) {
        Ok(user) => user,
        Err(e) => {
            warn!("rejected token request: {}", e);
            return Err(e);
        }
    };

    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let token = generator.generate(&user)?;
    debug!(user = user.as_str(), "token generated");
    Ok(token)
}
