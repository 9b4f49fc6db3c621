//! Client error types

use shared::error::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response not covered by a more specific variant
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Authentication required (stored tokens have been cleared)
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied (stored tokens have been cleared)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error, local or reported by the server
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token store I/O
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Token could not be decoded
    #[error("Invalid token: {0}")]
    Token(String),

    /// Live feed (WebSocket / STOMP) failure
    #[error("Live feed error: {0}")]
    Live(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Order placed with nothing in the cart
    #[error("Your cart is empty!")]
    EmptyCart,
}

impl ClientError {
    /// True when the caller should send the user back to the login screen
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }

    /// Human-readable text for notifications and inline errors
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. }
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Live(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
