use std::{str::FromStr, time::Duration};

use crate::domain::error::DomainError;

const DEFAULT_SECRET: &str = "testtoken";
const DEFAULT_EXPIRATION_HOURS: i64 = 24;
const DEFAULT_LATENCY_MS: u64 = 0;
const DEFAULT_TEST_TIMEOUT_MS: u64 = 5000;

/// Settings for token generation and the async test harness
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub expiration_hours: i64,
    /// Simulated delay before a generated token is delivered
    pub latency: Duration,
    /// How long an async test, or the binary's callback wait, may take to complete
    pub test_timeout: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: DEFAULT_EXPIRATION_HOURS,
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            test_timeout: Duration::from_millis(DEFAULT_TEST_TIMEOUT_MS),
        }
    }
}

impl TokenConfig {
    /// Read settings from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self, DomainError> {
        // a missing .env is fine, variables may come from the environment
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_SECRET.to_string());
        if secret.is_empty() {
            return Err(DomainError::Config("JWT_SECRET must not be empty".to_string()));
        }

        let expiration_hours =
            parse_or(&lookup, "TOKEN_EXPIRATION_HOURS", DEFAULT_EXPIRATION_HOURS)?;
        if expiration_hours <= 0 {
            return Err(DomainError::Config(format!(
                "TOKEN_EXPIRATION_HOURS must be positive, got {}",
                expiration_hours
            )));
        }
        let latency_ms = parse_or(&lookup, "TOKEN_LATENCY_MS", DEFAULT_LATENCY_MS)?;
        let timeout_ms = parse_or(&lookup, "TEST_TIMEOUT_MS", DEFAULT_TEST_TIMEOUT_MS)?;

        Ok(Self {
            secret,
            expiration_hours,
            latency: Duration::from_millis(latency_ms),
            test_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, DomainError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DomainError::Config(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[rstest]
    fn test_defaults_positive() {
        let config = TokenConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!("testtoken", config.secret);
        assert_eq!(24, config.expiration_hours);
        assert_eq!(Duration::ZERO, config.latency);
        assert_eq!(Duration::from_secs(5), config.test_timeout);
    }

    #[rstest]
    fn test_overrides_positive() {
        let config = TokenConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_EXPIRATION_HOURS", "2"),
            ("TOKEN_LATENCY_MS", " 150 "),
            ("TEST_TIMEOUT_MS", "100"),
        ]))
        .unwrap();
        assert_eq!("s3cret", config.secret);
        assert_eq!(2, config.expiration_hours);
        assert_eq!(Duration::from_millis(150), config.latency);
        assert_eq!(Duration::from_millis(100), config.test_timeout);
    }

    #[rstest]
    #[case("TOKEN_LATENCY_MS", "soon")]
    #[case("TEST_TIMEOUT_MS", "-1")]
    #[case("TOKEN_EXPIRATION_HOURS", "0")]
    #[case("JWT_SECRET", "")]
    fn test_invalid_value_negative(#[case] key: &str, #[case] value: &str) {
        let result = TokenConfig::from_lookup(lookup_from(&[(key, value)]));
        assert!(matches!(result, Err(DomainError::Config(_))));
    }
}
