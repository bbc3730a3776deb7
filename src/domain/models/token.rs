use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque token handed back by a [`TokenGenerator`](crate::domain::services::token_service::TokenGenerator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token(String);

impl Token {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A token counts as defined when it carries any content at all
    pub fn is_defined(&self) -> bool {
        !self.0.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}
