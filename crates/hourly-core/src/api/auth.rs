use tracing::debug;

use crate::client::AuthenticatedRequestClient;
use crate::constants::{LOGIN_PATH, PROFILE_PATH, REGISTER_PATH, USER_INFO_PATH};
use crate::error::ClientError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::request::RequestOptions;
use crate::response::{ensure_success, read_json};
use crate::session::TerminationReason;

impl AuthenticatedRequestClient {
    /// Exchanges credentials for a token pair and stores both tokens.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .send_unauthenticated(LOGIN_PATH, RequestOptions::post(&payload)?)
            .await?;
        let login: LoginResponse = read_json(response).await?;
        self.store()
            .store_credentials(&login.access, &login.refresh)?;
        debug!(email = %email, "stored session tokens");
        Ok(login)
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<(), ClientError> {
        let response = self
            .send_unauthenticated(REGISTER_PATH, RequestOptions::post(payload)?)
            .await?;
        ensure_success(response).await
    }

    pub async fn profile(&self) -> Result<User, ClientError> {
        let response = self.request(PROFILE_PATH, RequestOptions::get()).await?;
        read_json(response).await
    }

    pub async fn user_info(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.request(USER_INFO_PATH, RequestOptions::get()).await?;
        read_json(response).await
    }

    /// Forgets the local session. The backend keeps no server-side state for
    /// the access token, so nothing is sent.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.terminate_session(TerminationReason::Logout)?;
        Ok(())
    }
}
