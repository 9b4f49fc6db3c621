//! Admin and table sessions backed by the token store

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use shared::client::TokenClaims;
use std::sync::Arc;

use crate::error::{ClientError, ClientResult};
use crate::storage::{TokenSlot, TokenStore};

/// Decode the payload segment of a JWT without checking its signature
///
/// Only used to read display fields; the backend validates the token.
pub fn decode_claims(token: &str) -> ClientResult<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| ClientError::Token("expected three dot-separated segments".into()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClientError::Token(format!("payload is not base64url: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Token(format!("bad claims: {e}")))
}

/// Authentication state shared by every view
#[derive(Debug, Clone)]
pub struct AuthSession {
    tokens: Arc<dyn TokenStore>,
}

impl AuthSession {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }

    /// Persist a freshly issued admin token
    pub fn login(&self, token: &str) -> ClientResult<()> {
        self.tokens.set(TokenSlot::Admin, token)
    }

    /// Forget the admin token
    pub fn logout(&self) -> ClientResult<()> {
        self.tokens.remove(TokenSlot::Admin)
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.get(TokenSlot::Admin)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Claims of the stored admin token, `None` when absent or undecodable
    pub fn user(&self) -> Option<TokenClaims> {
        let token = self.token()?;
        match decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::warn!("Invalid token: {e}");
                None
            }
        }
    }

    /// True when the stored token carries an `exp` claim in the past
    ///
    /// Presence alone counts as logged in; the backend rejects expired
    /// tokens with a 401, which clears them.
    pub fn is_expired(&self) -> bool {
        self.user()
            .is_some_and(|claims| claims.is_expired_at(shared::util::now_secs()))
    }

    pub fn restaurant_id(&self) -> Option<i64> {
        self.user().and_then(|claims| claims.restaurant_id)
    }

    /// Guard for admin-only views
    pub fn require_auth(&self) -> ClientResult<String> {
        self.token()
            .ok_or_else(|| ClientError::Unauthorized("Please log in to continue".into()))
    }

    // ========== Table session ==========

    pub fn session_token(&self) -> Option<String> {
        self.tokens.get(TokenSlot::Session)
    }

    pub fn start_table_session(&self, token: &str) -> ClientResult<()> {
        self.tokens.set(TokenSlot::Session, token)
    }

    pub fn end_table_session(&self) -> ClientResult<()> {
        self.tokens.remove(TokenSlot::Session)
    }
}
