use std::time::Duration;

use serde::Serialize;
use tracing::info;

use async_token::{
    config::TokenConfig,
    domain::{
        error::DomainError, models::token::Token, services::token_service::TokenGenerator,
    },
    infrastructure::jwt_token_generator::JwtTokenGenerator,
    logging::init_logging,
    usecase::generate_token_usecase::GenerateTokenUsecase,
};

const DEFAULT_USER: &str = "testuser@example.com";

#[derive(Serialize)]
struct Output {
    user: String,
    callback_token: Token,
    promise_token: Token,
}

/// Bridge the callback style back onto the calling task, bounded by `timeout`
async fn await_callback_token<T: TokenGenerator + 'static>(
    usecase: &GenerateTokenUsecase<T>,
    user: &str,
    timeout: Duration,
) -> Result<Token, DomainError> {
    let (sender, receiver) = tokio::sync::oneshot::channel();
    usecase.generate_token(user, move |err, token| {
        let _ = sender.send(match (err, token) {
            (None, Some(token)) => Ok(token),
            (Some(e), _) => Err(e),
            (None, None) => Err(DomainError::TokenEncoding("no token delivered".to_string())),
        });
    });

    tokio::time::timeout(timeout, receiver)
        .await
        .map_err(|_| DomainError::Timeout(timeout))?
        .map_err(|e| DomainError::TaskAborted(e.to_string()))?
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TokenConfig::from_env()?;
    init_logging("info")?;

    let user = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_USER.to_string());

    let token_generator =
        JwtTokenGenerator::with_expiration(config.secret.clone(), config.expiration_hours);
    let usecase = GenerateTokenUsecase::with_latency(token_generator, config.latency);

    let callback_token = await_callback_token(&usecase, &user, config.test_timeout).await?;
    info!("token generated via callback");

    // promise style
    let promise_token = usecase.generate_token_promise(&user).await?;
    info!("token generated via promise");

    let output = Output {
        user,
        callback_token,
        promise_token,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
