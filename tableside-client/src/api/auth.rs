use shared::client::{
    LoginRequest, LoginResponse, RegistrationRequest, TableSessionRequest, TableSessionResponse,
    TokenClaims,
};

use crate::error::ClientResult;
use crate::http::{ApiClient, HttpClient};

impl ApiClient {
    /// Register an owner account together with its restaurant
    pub async fn register(&self, request: &RegistrationRequest) -> ClientResult<()> {
        request.validate()?;
        let _: Option<serde_json::Value> = self.post("/api/auth/register", request).await?;
        tracing::info!(owner = %request.owner_name, "Registered restaurant account");
        Ok(())
    }

    /// Exchange credentials for an admin token
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        request.validate()?;
        self.post("/api/auth/login", &request).await
    }

    /// Login and persist the issued token
    ///
    /// Returns the decoded claims when the token carries readable ones.
    pub async fn sign_in(&self, username: &str, password: &str) -> ClientResult<Option<TokenClaims>> {
        let LoginResponse { token } = self.login(username, password).await?;
        let auth = self.auth();
        auth.login(&token)?;
        let user = auth.user();
        tracing::info!(username, restaurant_id = ?user.as_ref().and_then(|u| u.restaurant_id), "Signed in");
        Ok(user)
    }

    /// Forget the admin token (no server call; tokens are stateless)
    pub fn sign_out(&self) -> ClientResult<()> {
        self.auth().logout()
    }

    /// Authenticate a table and persist the session token
    pub async fn open_table_session(
        &self,
        request: &TableSessionRequest,
    ) -> ClientResult<TableSessionResponse> {
        let response: TableSessionResponse = self.post("/api/sessions", request).await?;
        self.auth().start_table_session(&response.session_token)?;
        tracing::info!(
            table_id = request.table_id,
            session_id = %response.session_id,
            "Table session opened"
        );
        Ok(response)
    }
}
