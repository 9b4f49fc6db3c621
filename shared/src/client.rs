//! Auth and session types shared between the API gateway and the views
//!
//! Request/response bodies of the `/api/auth` and `/api/sessions` endpoints
//! plus the claims carried in the admin token.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult, min_len, require};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> ValidationResult {
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Owner + restaurant registration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Owner's full name, also used as the username
    pub owner_name: String,
    pub owner_email: String,
    pub password: String,
    pub restaurant_name: String,
    #[serde(default)]
    pub restaurant_address: String,
}

impl RegistrationRequest {
    pub fn validate(&self) -> ValidationResult {
        min_len("ownerName", &self.owner_name, 2)?;
        require("ownerEmail", &self.owner_email)?;
        if !is_plausible_email(self.owner_email.trim()) {
            return Err(ValidationError::InvalidFormat {
                field: "ownerEmail",
            });
        }
        if self.password.chars().count() < 6 {
            require("password", &self.password)?;
            return Err(ValidationError::TooShort {
                field: "password",
                min: 6,
            });
        }
        min_len("restaurantName", &self.restaurant_name, 3)
    }
}

/// `local@domain.tld` with no whitespace
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Claims carried in the admin token
///
/// Decoded client-side for display only; the backend remains the authority
/// on whether the token is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Username
    pub sub: String,
    pub restaurant_id: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry (seconds since epoch)
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.exp.is_some_and(|exp| now_secs > exp)
    }
}

// =============================================================================
// Table session DTOs
// =============================================================================

/// Authenticate a table device/customer against a provisioned table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSessionRequest {
    pub restaurant_id: i64,
    pub table_id: i64,
    pub secret_key: String,
}

/// Session credential for the customer view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSessionResponse {
    pub session_token: String,
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationRequest {
        RegistrationRequest {
            owner_name: "Asha Rao".into(),
            owner_email: "asha@example.com".into(),
            password: "secret1".into(),
            restaurant_name: "Dosa Hut".into(),
            restaurant_address: String::new(),
        }
    }

    #[test]
    fn test_registration_valid() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn test_registration_rules() {
        let mut req = registration();
        req.password = "abc".into();
        assert_eq!(
            req.validate(),
            Err(ValidationError::TooShort {
                field: "password",
                min: 6
            })
        );

        let mut req = registration();
        req.owner_email = "not-an-email".into();
        assert_eq!(
            req.validate(),
            Err(ValidationError::InvalidFormat { field: "ownerEmail" })
        );

        let mut req = registration();
        req.restaurant_name = "Ab".into();
        assert!(matches!(
            req.validate(),
            Err(ValidationError::TooShort {
                field: "restaurantName",
                ..
            })
        ));
    }

    #[test]
    fn test_registration_wire_format() {
        let json = serde_json::to_value(registration()).unwrap();
        assert_eq!(json["ownerName"], "Asha Rao");
        assert_eq!(json["restaurantAddress"], "");
    }

    #[test]
    fn test_claims_deserialize() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"sub":"asha","restaurantId":3,"exp":100}"#).unwrap();
        assert_eq!(claims.restaurant_id, Some(3));
        assert!(claims.is_expired_at(101));
        assert!(!claims.is_expired_at(100));
    }
}
