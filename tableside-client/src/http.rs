//! HTTP gateway to the ordering API
//!
//! Every request carries `Content-Type: application/json` and, when one is
//! stored, a bearer token. Non-success responses become [`ClientError`]s
//! carrying the backend's message; 401/403 additionally clear both stored
//! tokens so the caller can send the user back to the login screen. Rejections
//! from the `/api/auth/` endpoints are wrong credentials and clear nothing.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::ErrorBody;
use std::sync::Arc;

use crate::auth::AuthSession;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::storage::{FileTokenStore, TokenSlot, TokenStore};

/// JSON request methods over the ordering API
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
}

/// Credential endpoints; their 401s mean bad credentials, not a stale token
const AUTH_PATH_PREFIX: &str = "/api/auth/";

/// Network client for the ordering API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is required".into()));
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Client persisting its tokens under `config.storage_dir`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(config, Arc::new(FileTokenStore::new(&config.storage_dir)))
    }

    /// API origin without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session view over the same token store
    pub fn auth(&self) -> AuthSession {
        AuthSession::new(self.tokens.clone())
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Admin token if logged in, otherwise the table session token
    fn bearer_token(&self) -> Option<String> {
        self.tokens
            .get(TokenSlot::Admin)
            .or_else(|| self.tokens.get(TokenSlot::Session))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<T> {
        tracing::debug!(%method, path, "API request");

        let mut req = self
            .client
            .request(method.clone(), self.url(path))
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.bearer_token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!(%method, path, "API request failed: {e}");
            ClientError::from(e)
        })?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let err = self.error_from_response(path, status, &text);
            tracing::error!(%method, path, status = status.as_u16(), "API error: {err}");
            return Err(err);
        }

        let data = decode_body(status, &text)?;
        tracing::debug!(%method, path, status = status.as_u16(), "API response");
        Ok(data)
    }

    fn error_from_response(&self, path: &str, status: StatusCode, text: &str) -> ClientError {
        let message = ErrorBody::parse(text)
            .and_then(|body| body.message().map(str::to_owned))
            .or_else(|| status.canonical_reason().map(str::to_owned))
            .unwrap_or_else(|| format!("HTTP error! Status: {}", status.as_u16()));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                // A rejected login leaves the table session alone
                if !is_auth_path(path) {
                    tracing::warn!(
                        status = status.as_u16(),
                        "Authentication rejected, clearing stored tokens"
                    );
                    if let Err(e) = self.tokens.clear() {
                        tracing::error!("Failed to clear stored tokens: {e}");
                    }
                }
                if status == StatusCode::UNAUTHORIZED {
                    ClientError::Unauthorized(message)
                } else {
                    ClientError::Forbidden(message)
                }
            }
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

fn is_auth_path(path: &str) -> bool {
    let path = format!("/{}", path.trim_start_matches('/'));
    path.starts_with(AUTH_PATH_PREFIX)
}

/// Decode a success body
///
/// 204 and empty bodies decode as JSON `null` (so `()` and `Option<T>`
/// work). A 201 whose body does not parse also decodes as `null`.
fn decode_body<T: DeserializeOwned>(status: StatusCode, text: &str) -> ClientResult<T> {
    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        return serde_json::from_str("null").map_err(|_| {
            ClientError::InvalidResponse(format!(
                "expected a response body, got HTTP {} with none",
                status.as_u16()
            ))
        });
    }
    match serde_json::from_str(text) {
        Ok(data) => Ok(data),
        Err(e) if status == StatusCode::CREATED => {
            serde_json::from_str("null").map_err(|_| ClientError::from(e))
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl HttpClient for ApiClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.send(Method::PATCH, path, Some(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStore;

    fn client(store: Arc<MemoryTokenStore>) -> ApiClient {
        ApiClient::new(&ClientConfig::new("http://localhost:8080/"), store).unwrap()
    }

    #[test]
    fn test_url_join() {
        let api = client(Arc::new(MemoryTokenStore::new()));
        assert_eq!(api.url("/api/menu/1"), "http://localhost:8080/api/menu/1");
        assert_eq!(api.url("api/orders"), "http://localhost:8080/api/orders");
    }

    #[test]
    fn test_bearer_prefers_admin_token() {
        let store = Arc::new(MemoryTokenStore::new());
        let api = client(store.clone());
        assert!(api.bearer_token().is_none());

        store.set(TokenSlot::Session, "session").unwrap();
        assert_eq!(api.bearer_token().as_deref(), Some("session"));

        store.set(TokenSlot::Admin, "admin").unwrap();
        assert_eq!(api.bearer_token().as_deref(), Some("admin"));
    }

    #[test]
    fn test_from_config_uses_token_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = ClientConfig::default().with_storage_dir(temp_dir.path());
        let api = ApiClient::from_config(&config).unwrap();

        api.auth().start_table_session("session").unwrap();
        assert!(temp_dir.path().join(crate::storage::TOKEN_FILE).exists());
        assert_eq!(api.bearer_token().as_deref(), Some("session"));
    }

    #[test]
    fn test_decode_body() {
        let none: Option<serde_json::Value> = decode_body(StatusCode::NO_CONTENT, "").unwrap();
        assert!(none.is_none());

        let created: Option<i64> = decode_body(StatusCode::CREATED, "Created").unwrap();
        assert!(created.is_none());

        let value: i64 = decode_body(StatusCode::OK, "42").unwrap();
        assert_eq!(value, 42);

        assert!(decode_body::<i64>(StatusCode::OK, "").is_err());
        assert!(decode_body::<i64>(StatusCode::OK, "nope").is_err());
    }

    #[test]
    fn test_error_mapping_clears_tokens() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set(TokenSlot::Admin, "admin").unwrap();
        store.set(TokenSlot::Session, "session").unwrap();
        let api = client(store.clone());

        let err = api.error_from_response("/api/admin/menu-items", StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Unauthorized"));
        assert!(store.get(TokenSlot::Admin).is_none());
        assert!(store.get(TokenSlot::Session).is_none());

        let err = api.error_from_response(
            "/api/orders",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"Database unavailable"}"#,
        );
        assert!(matches!(
            err,
            ClientError::Api { status: 500, ref message } if message == "Database unavailable"
        ));

        let err = api.error_from_response("/api/orders", StatusCode::from_u16(599).unwrap(), "");
        assert_eq!(err.user_message(), "HTTP error! Status: 599");
    }

    #[test]
    fn test_rejected_login_keeps_tokens() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set(TokenSlot::Session, "session").unwrap();
        let api = client(store.clone());

        let err = api.error_from_response(
            "/api/auth/login",
            StatusCode::UNAUTHORIZED,
            r#"{"message":"Bad credentials"}"#,
        );
        assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Bad credentials"));
        assert_eq!(store.get(TokenSlot::Session).as_deref(), Some("session"));

        assert!(is_auth_path("api/auth/register"));
        assert!(!is_auth_path("/api/admin/tables"));
    }
}
