//! Error types shared between the models and the client
//!
//! The backend reports failures as a JSON object carrying a human-readable
//! `message`. Form validation failures are raised locally before any request
//! is made.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the ordering API on non-success responses
///
/// ```json
/// { "message": "Menu item not found" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl ErrorBody {
    /// Parse an error body, returning `None` for non-JSON payloads
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Message if the backend supplied a non-empty one
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Client-side form validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required field is missing or blank
    #[error("{0} is required")]
    Required(&'static str),

    /// Field shorter than its minimum length
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Numeric field out of its allowed range
    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    /// Field has an invalid format
    #[error("{field} has an invalid format")]
    InvalidFormat { field: &'static str },
}

/// Result alias for validation
pub type ValidationResult = Result<(), ValidationError>;

/// Check a required text field is not blank
pub(crate) fn require(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Check a text field meets its minimum length (in characters, trimmed)
pub(crate) fn min_len(field: &'static str, value: &str, min: usize) -> ValidationResult {
    require(field, value)?;
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_parse() {
        let body = ErrorBody::parse(r#"{"message":"Table not found","status":404}"#).unwrap();
        assert_eq!(body.message(), Some("Table not found"));
        assert_eq!(body.status, Some(404));

        assert!(ErrorBody::parse("<html>Bad Gateway</html>").is_none());

        let blank = ErrorBody::parse(r#"{"message":"  "}"#).unwrap();
        assert_eq!(blank.message(), None);
    }

    #[test]
    fn test_min_len() {
        assert!(min_len("name", "Al", 2).is_ok());
        assert_eq!(
            min_len("name", " A ", 2),
            Err(ValidationError::TooShort { field: "name", min: 2 })
        );
        assert_eq!(min_len("name", "   ", 2), Err(ValidationError::Required("name")));
    }
}
